//! In-memory incident store for classwatch.
//!
//! Incidents are kept per class, newest first, with a fixed capacity per
//! class. When a class is full the oldest incident is evicted. Nothing is
//! persisted: a restart starts from an empty store.

use std::collections::{HashMap, VecDeque};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::debug;

use crate::incident::{Incident, ScanMode};
use crate::query::filter_incidents;

/// Default number of incidents retained per class.
pub const DEFAULT_MAX_PER_CLASS: usize = 500;

/// Storage engine for incidents.
///
/// The insert-then-trim sequence runs under the write lock so the capacity
/// bound holds with concurrent writers. Queries share the read lock.
#[derive(Debug)]
pub struct IncidentStore {
    /// Incidents per class, newest at the front.
    classes: RwLock<HashMap<String, VecDeque<Incident>>>,
    /// Capacity per class.
    max_per_class: usize,
}

/// Summary of what the store currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StoreStats {
    /// Number of classes with at least one incident.
    pub classes: usize,
    /// Total incidents across all classes.
    pub incidents: usize,
}

impl Default for IncidentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IncidentStore {
    /// Create an empty store with the default per-class capacity.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_PER_CLASS)
    }

    /// Create an empty store keeping at most `max_per_class` incidents per class.
    ///
    /// A capacity of 0 is raised to 1.
    #[must_use]
    pub fn with_capacity(max_per_class: usize) -> Self {
        Self {
            classes: RwLock::new(HashMap::new()),
            max_per_class: max_per_class.max(1),
        }
    }

    /// Per-class capacity.
    #[must_use]
    pub fn max_per_class(&self) -> usize {
        self.max_per_class
    }

    /// Record an incident at the front of its class, evicting the oldest if full.
    pub fn record(&self, incident: Incident) {
        let mut classes = self.write();
        let entries = classes.entry(incident.class_id.clone()).or_default();
        entries.push_front(incident);

        if entries.len() > self.max_per_class {
            if let Some(evicted) = entries.pop_back() {
                debug!(
                    class_id = %evicted.class_id,
                    zone_id = %evicted.zone_id,
                    "Evicted oldest incident"
                );
            }
        }
    }

    /// Incidents of `class_id` recorded on `date` under `mode`, newest first.
    ///
    /// An unknown class yields an empty list.
    #[must_use]
    pub fn filter(&self, mode: &ScanMode, class_id: &str, date: &str) -> Vec<Incident> {
        let classes = self.read();
        match classes.get(class_id) {
            Some(entries) => filter_incidents(entries, mode, date),
            None => Vec::new(),
        }
    }

    /// Number of incidents held for `class_id`.
    #[must_use]
    pub fn len(&self, class_id: &str) -> usize {
        self.read().get(class_id).map_or(0, VecDeque::len)
    }

    /// Whether the store holds no incidents at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().values().all(VecDeque::is_empty)
    }

    /// Get store statistics.
    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let classes = self.read();
        StoreStats {
            classes: classes.len(),
            incidents: classes.values().map(VecDeque::len).sum(),
        }
    }

    // Every mutation leaves the map consistent, so a poisoned lock is still usable.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, VecDeque<Incident>>> {
        self.classes.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, VecDeque<Incident>>> {
        self.classes.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::incident::sample;

    fn numbered(class_id: &str, n: usize) -> Incident {
        let mut incident = sample(class_id, &format!("zone-{n}"), 1.0);
        incident.start_time = format!("t{n}");
        incident
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = IncidentStore::new();
        assert!(store.is_empty());
        assert_eq!(store.max_per_class(), DEFAULT_MAX_PER_CLASS);
        assert_eq!(store.stats(), StoreStats::default());
    }

    #[test]
    fn test_record_and_filter() {
        let store = IncidentStore::new();
        store.record(sample("10A1", "7", 12.0));

        let found = store.filter(&ScanMode::Full, "10A1", "2024-05-01");
        assert_eq!(found, vec![sample("10A1", "7", 12.0)]);
        assert!(!store.is_empty());
    }

    #[test]
    fn test_filter_mismatches_are_empty() {
        let store = IncidentStore::new();
        store.record(sample("10A1", "7", 12.0));

        assert!(store.filter(&ScanMode::Full, "10A2", "2024-05-01").is_empty());
        assert!(store.filter(&ScanMode::Full, "10A1", "2024-05-02").is_empty());
        assert!(store
            .filter(&ScanMode::Distraction, "10A1", "2024-05-01")
            .is_empty());
    }

    #[test]
    fn test_record_is_newest_first() {
        let store = IncidentStore::new();
        store.record(numbered("c", 1));
        store.record(numbered("c", 2));
        store.record(numbered("c", 3));

        let found = store.filter(&ScanMode::Full, "c", "2024-05-01");
        let order: Vec<&str> = found.iter().map(|i| i.start_time.as_str()).collect();
        assert_eq!(order, vec!["t3", "t2", "t1"]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let store = IncidentStore::new();
        for n in 0..=DEFAULT_MAX_PER_CLASS {
            store.record(numbered("c", n));
        }

        assert_eq!(store.len("c"), DEFAULT_MAX_PER_CLASS);

        let found = store.filter(&ScanMode::Full, "c", "2024-05-01");
        assert!(found.iter().all(|i| i.start_time != "t0"));
        for n in 1..=DEFAULT_MAX_PER_CLASS {
            let expected = format!("t{n}");
            assert!(found.iter().any(|i| i.start_time == expected));
        }
        assert_eq!(found[0].start_time, format!("t{DEFAULT_MAX_PER_CLASS}"));
        assert_eq!(found[DEFAULT_MAX_PER_CLASS - 1].start_time, "t1");
    }

    #[test]
    fn test_capacity_is_per_class() {
        let store = IncidentStore::with_capacity(2);
        for n in 0..5 {
            store.record(numbered("a", n));
        }
        store.record(numbered("b", 0));

        assert_eq!(store.len("a"), 2);
        assert_eq!(store.len("b"), 1);
        assert_eq!(
            store.stats(),
            StoreStats {
                classes: 2,
                incidents: 3
            }
        );
    }

    #[test]
    fn test_zero_capacity_is_raised() {
        let store = IncidentStore::with_capacity(0);
        store.record(numbered("c", 0));
        store.record(numbered("c", 1));
        assert_eq!(store.len("c"), 1);
    }

    #[test]
    fn test_concurrent_writers_respect_capacity() {
        let store = Arc::new(IncidentStore::with_capacity(50));
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for n in 0..100 {
                        store.record(numbered("shared", t * 1000 + n));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(store.len("shared"), 50);
    }
}
