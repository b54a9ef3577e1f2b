//! Per-zone risk ranking.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::incident::Incident;

/// Accumulated risk for one zone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneScore {
    /// Zone identifier.
    pub id: String,
    /// Total incident seconds, truncated toward zero.
    pub score: i64,
}

/// Rank zones by the summed duration of their incidents, highest first.
///
/// Zones with equal totals are ordered by zone id, ascending. Sums are
/// accumulated as `f64` and only truncated once, when the score is emitted.
#[must_use]
pub fn rank(incidents: &[Incident]) -> Vec<ZoneScore> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for incident in incidents {
        *totals.entry(incident.zone_id.as_str()).or_insert(0.0) += incident.duration_seconds;
    }

    // BTreeMap yields zone ids in ascending order; the stable sort keeps it for ties.
    let mut ranked: Vec<(&str, f64)> = totals.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
        .into_iter()
        .map(|(id, total)| ZoneScore {
            id: id.to_string(),
            score: truncate(total),
        })
        .collect()
}

#[allow(clippy::cast_possible_truncation)]
fn truncate(total: f64) -> i64 {
    total.trunc() as i64
}
