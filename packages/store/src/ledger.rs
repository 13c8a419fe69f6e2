//! Per-neighborhood report tallies.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use sidewalk_map_report_models::Neighborhood;

/// Running report counts keyed by neighborhood name.
///
/// Entries are registered once at store initialization and never
/// removed. Lookups are exact string matches: no trimming, no case
/// folding. The ledger itself is not synchronized; the owning store
/// holds it behind its lock.
#[derive(Debug)]
pub struct NeighborhoodLedger {
    entries: BTreeMap<String, Neighborhood>,
    next_id: i64,
}

impl Default for NeighborhoodLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl NeighborhoodLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Registers a neighborhood with a starting count, assigning the
    /// next ledger ID. First registration wins: re-registering an
    /// existing name is a no-op and the original entry is kept.
    pub fn register(&mut self, name: &str, count: u64) {
        if let Entry::Vacant(slot) = self.entries.entry(name.to_string()) {
            let id = self.next_id;
            self.next_id += 1;
            slot.insert(Neighborhood {
                id,
                name: name.to_string(),
                count,
            });
        }
    }

    /// Returns all entries in registration order.
    #[must_use]
    pub fn all(&self) -> Vec<Neighborhood> {
        let mut entries: Vec<Neighborhood> = self.entries.values().cloned().collect();
        entries.sort_by_key(|n| n.id);
        entries
    }

    /// Exact-match lookup by name. Absence is a valid result.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Neighborhood> {
        self.entries.get(name)
    }

    /// Increments the count for `name` by 1.
    ///
    /// Returns `false` without changing anything when the name is
    /// unknown. Unrecognized names are deliberately a silent miss:
    /// report creation must not fail or grow the ledger.
    pub fn increment(&mut self, name: &str) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.count += 1;
                true
            }
            None => false,
        }
    }

    /// Administrative override of a neighborhood's count.
    ///
    /// Returns `false` without changing anything when the name is
    /// unknown.
    pub fn set_count(&mut self, name: &str, count: u64) -> bool {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.count = count;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> NeighborhoodLedger {
        let mut ledger = NeighborhoodLedger::new();
        ledger.register("Tenderloin", 12);
        ledger.register("SOMA", 9);
        ledger
    }

    #[test]
    fn register_assigns_sequential_ids() {
        let ledger = seeded();
        let all = ledger.all();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, 1);
        assert_eq!(all[0].name, "Tenderloin");
        assert_eq!(all[1].id, 2);
        assert_eq!(all[1].name, "SOMA");
    }

    #[test]
    fn reregistering_keeps_original_entry() {
        let mut ledger = seeded();
        ledger.register("SOMA", 99);
        let soma = ledger.get("SOMA").unwrap();
        assert_eq!(soma.count, 9);
        assert_eq!(soma.id, 2);
    }

    #[test]
    fn increment_touches_only_the_named_entry() {
        let mut ledger = seeded();
        assert!(ledger.increment("SOMA"));
        assert_eq!(ledger.get("SOMA").unwrap().count, 10);
        assert_eq!(ledger.get("Tenderloin").unwrap().count, 12);
    }

    #[test]
    fn increment_unknown_name_is_a_silent_miss() {
        let mut ledger = seeded();
        assert!(!ledger.increment("Outer Space"));
        assert_eq!(ledger.all().len(), 2, "miss must not grow the ledger");
    }

    #[test]
    fn lookups_are_exact_match() {
        let ledger = seeded();
        assert!(ledger.get("soma").is_none());
        assert!(ledger.get(" SOMA").is_none());
        assert!(ledger.get("SOMA").is_some());
    }

    #[test]
    fn set_count_overrides_and_misses_silently() {
        let mut ledger = seeded();
        assert!(ledger.set_count("Tenderloin", 0));
        assert_eq!(ledger.get("Tenderloin").unwrap().count, 0);
        assert!(!ledger.set_count("Nowhere", 5));
    }
}
