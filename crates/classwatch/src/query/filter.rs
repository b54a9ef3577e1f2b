//! Exact-match incident filter.

use tracing::trace;

use crate::incident::{Incident, ScanMode};

/// Keep the incidents recorded on `date` under `mode`, preserving input order.
///
/// The date is compared as a plain string. Incidents from the other scan
/// mode are excluded even when their issue type would qualify.
pub fn filter_incidents<'a, I>(incidents: I, mode: &ScanMode, date: &str) -> Vec<Incident>
where
    I: IntoIterator<Item = &'a Incident>,
{
    let matched: Vec<Incident> = incidents
        .into_iter()
        .filter(|incident| incident.date == date)
        .filter(|incident| incident.scan_mode == *mode)
        .cloned()
        .collect();

    trace!(%mode, date, matched = matched.len(), "Filtered incidents");
    matched
}
