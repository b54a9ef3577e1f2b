//! Core incident types for classwatch.
//!
//! An [`Incident`] is one behavioral event reported by a classroom monitoring
//! agent: who (zone), where (class), when (date and free-form times), what
//! (issue type and duration) and under which [`ScanMode`] it was detected.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operating mode of the agent when the incident was detected.
///
/// Tags are kept exactly as the agent sent them: the two tags the dashboard
/// offers get their own variants, any other tag is carried verbatim in
/// [`ScanMode::Other`]. Two modes are equal iff their tags are the same
/// string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScanMode {
    /// Broad behavior detection (`epd_full`).
    Full,
    /// Detection restricted to distraction behaviors (`epd_distraction`).
    Distraction,
    /// Any other tag, e.g. `full` or `distraction-only`.
    Other(String),
}

impl ScanMode {
    /// Wire tag for this mode.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Full => "epd_full",
            Self::Distraction => "epd_distraction",
            Self::Other(tag) => tag,
        }
    }
}

impl fmt::Display for ScanMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for ScanMode {
    fn from(tag: &str) -> Self {
        match tag {
            "epd_full" => Self::Full,
            "epd_distraction" => Self::Distraction,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for ScanMode {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "epd_full" => Self::Full,
            "epd_distraction" => Self::Distraction,
            _ => Self::Other(tag),
        }
    }
}

impl From<ScanMode> for String {
    fn from(mode: ScanMode) -> Self {
        match mode {
            ScanMode::Other(tag) => tag,
            known => known.as_str().to_string(),
        }
    }
}

/// A single recorded behavioral incident.
///
/// Times and dates are kept as the agent sent them; they are compared
/// verbatim and never parsed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Class the incident belongs to.
    pub class_id: String,
    /// Seat or student the incident is attributed to.
    pub zone_id: String,
    /// Behavior label, e.g. "Ngủ" or "Mất tập trung".
    pub issue_type: String,
    /// Free-form start time.
    pub start_time: String,
    /// Free-form end time.
    pub end_time: String,
    /// How long the behavior lasted, in seconds.
    pub duration_seconds: f64,
    /// Calendar date, usually `YYYY-MM-DD`.
    pub date: String,
    /// Mode the agent was scanning in.
    pub scan_mode: ScanMode,
}

/// Reasons an incoming incident is refused at ingestion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Duration was negative.
    #[error("duration_seconds must be non-negative, got {0}")]
    NegativeDuration(f64),
    /// Duration was NaN or infinite.
    #[error("duration_seconds must be a finite number")]
    NonFiniteDuration,
}

impl Incident {
    /// Check the invariants that the JSON shape alone cannot express.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] if `duration_seconds` is negative or not finite.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.duration_seconds.is_finite() {
            return Err(ValidationError::NonFiniteDuration);
        }
        if self.duration_seconds < 0.0 {
            return Err(ValidationError::NegativeDuration(self.duration_seconds));
        }
        Ok(())
    }

    /// Whether this incident falls on `date` under `mode`.
    #[must_use]
    pub fn matches(&self, mode: &ScanMode, date: &str) -> bool {
        self.date == date && self.scan_mode == *mode
    }
}

#[cfg(test)]
pub(crate) fn sample(class_id: &str, zone_id: &str, duration: f64) -> Incident {
    Incident {
        class_id: class_id.to_string(),
        zone_id: zone_id.to_string(),
        issue_type: "Ngủ".to_string(),
        start_time: "08:00:00".to_string(),
        end_time: "08:00:10".to_string(),
        duration_seconds: duration,
        date: "2024-05-01".to_string(),
        scan_mode: ScanMode::Full,
    }
}
