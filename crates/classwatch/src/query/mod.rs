//! Read-side queries over stored incidents.
//!
//! - **Filtering**: selects the incidents of one class that fall on a given
//!   date under a given scan mode. Matching is exact string equality on both
//!   the date and the scan mode tag; there are no ranges and no
//!   case folding.
//!
//! - **Ranking**: turns a filtered set into a per-zone risk score, the total
//!   seconds of incidents attributed to that zone, highest first.
//!
//! # Example
//!
//! ```
//! use classwatch::query::{filter_incidents, rank};
//! use classwatch::{Incident, ScanMode};
//!
//! let incident = Incident {
//!     class_id: "10A1".into(),
//!     zone_id: "7".into(),
//!     issue_type: "Ngủ".into(),
//!     start_time: "08:00".into(),
//!     end_time: "08:01".into(),
//!     duration_seconds: 60.0,
//!     date: "2024-05-01".into(),
//!     scan_mode: ScanMode::Full,
//! };
//!
//! let matched = filter_incidents([&incident], &ScanMode::Full, "2024-05-01");
//! let ranking = rank(&matched);
//! assert_eq!(ranking[0].id, "7");
//! assert_eq!(ranking[0].score, 60);
//! ```

mod filter;
mod ranking;

pub use filter::filter_incidents;
pub use ranking::{rank, ZoneScore};
