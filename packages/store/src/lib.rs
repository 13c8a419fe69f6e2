#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! In-memory incident store and neighborhood ledger.
//!
//! [`IncidentStore`] owns the authoritative set of incident records and
//! the [`NeighborhoodLedger`] tallies, behind a single lock so that
//! identity assignment, record insertion, and the paired ledger
//! increment are atomic with respect to concurrent requests. Records
//! live for the process lifetime; nothing is ever deleted or archived.
//!
//! Construct a fresh store per process (or per test), apply a seed
//! dataset once, and hand the store to the serving layer.

pub mod ledger;
pub mod seed;

use std::collections::BTreeMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Duration, Local, Utc};
use sidewalk_map_report_models::{Incident, IncidentDraft, Neighborhood};

pub use ledger::NeighborhoodLedger;
pub use seed::{SeedData, SeedError};

/// Fallback reporter name for blank or absent reporters.
pub const ANONYMOUS_REPORTER: &str = "Anonymous";

/// Mutable state guarded by the store lock.
#[derive(Debug)]
struct StoreState {
    incidents: BTreeMap<i64, Incident>,
    next_incident_id: i64,
    ledger: NeighborhoodLedger,
}

/// The authoritative in-memory set of incident records.
///
/// All mutation goes through [`create`](Self::create) and the seeding
/// path; reads return cloned snapshots taken under the lock. Incident
/// IDs are assigned monotonically from 1 and never reused.
#[derive(Debug)]
pub struct IncidentStore {
    state: RwLock<StoreState>,
}

impl Default for IncidentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl IncidentStore {
    /// Creates an empty store with no incidents and an empty ledger.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: RwLock::new(StoreState {
                incidents: BTreeMap::new(),
                next_incident_id: 1,
                ledger: NeighborhoodLedger::new(),
            }),
        }
    }

    /// Creates a store pre-populated from a seed dataset, backdating
    /// the seeded incidents relative to the current instant.
    #[must_use]
    pub fn seeded(seed: &SeedData) -> Self {
        let store = Self::new();
        store.apply_seed(seed);
        store
    }

    /// Applies a seed dataset: registers neighborhoods in order and
    /// inserts incidents backdated by their `age_minutes` relative to
    /// the current instant.
    ///
    /// Seeded neighborhood counts already include the seeded incidents,
    /// so this path never increments the ledger.
    pub fn apply_seed(&self, seed: &SeedData) {
        self.apply_seed_at(seed, Utc::now());
    }

    /// Applies a seed dataset backdated relative to an explicit instant.
    pub fn apply_seed_at(&self, seed: &SeedData, now: DateTime<Utc>) {
        let mut state = self.write();
        for neighborhood in &seed.neighborhoods {
            state.ledger.register(&neighborhood.name, neighborhood.count);
        }
        for entry in &seed.incidents {
            let id = state.next_incident_id;
            state.next_incident_id += 1;
            state.incidents.insert(
                id,
                Incident {
                    id,
                    incident_type: entry.incident_type,
                    latitude: entry.latitude.clone(),
                    longitude: entry.longitude.clone(),
                    location: entry.location.clone(),
                    neighborhood: entry.neighborhood.clone(),
                    reporter: entry.reporter.clone(),
                    status: entry.status,
                    image_url: None,
                    created_at: now - Duration::minutes(entry.age_minutes),
                    is_recent: entry.is_recent,
                },
            );
        }
    }

    /// Stores a new incident report and returns the stored record.
    ///
    /// Assigns the next ID, stamps `created_at` with the current
    /// instant, sets `is_recent = true` unconditionally, and applies
    /// defaults (blank reporter becomes [`ANONYMOUS_REPORTER`], absent
    /// status becomes `pending`, blank image URL becomes absent). The
    /// matching ledger entry is incremented in the same critical
    /// section; an unrecognized neighborhood name leaves the ledger
    /// unchanged and only logs a warning.
    ///
    /// The store performs no field validation. Malformed input is
    /// rejected at the request boundary before a draft exists.
    pub fn create(&self, draft: IncidentDraft) -> Incident {
        let mut state = self.write();
        let id = state.next_incident_id;
        state.next_incident_id += 1;

        let reporter = draft
            .reporter
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| ANONYMOUS_REPORTER.to_string());
        let image_url = draft.image_url.filter(|u| !u.trim().is_empty());

        let incident = Incident {
            id,
            incident_type: draft.incident_type,
            latitude: draft.latitude,
            longitude: draft.longitude,
            location: draft.location,
            neighborhood: draft.neighborhood,
            reporter,
            status: draft.status.unwrap_or_default(),
            image_url,
            created_at: Utc::now(),
            is_recent: true,
        };
        state.incidents.insert(id, incident.clone());

        if !state.ledger.increment(&incident.neighborhood) {
            log::warn!(
                "Report {id} attributed to unknown neighborhood '{}'; tally unchanged",
                incident.neighborhood
            );
        }

        incident
    }

    /// Returns all incidents in ID (insertion) order.
    #[must_use]
    pub fn all(&self) -> Vec<Incident> {
        self.read().incidents.values().cloned().collect()
    }

    /// Looks up a single incident by ID. Absence is a valid result.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<Incident> {
        self.read().incidents.get(&id).cloned()
    }

    /// Returns all incidents whose neighborhood equals `name` exactly
    /// (case-sensitive, no trimming).
    #[must_use]
    pub fn by_neighborhood(&self, name: &str) -> Vec<Incident> {
        self.read()
            .incidents
            .values()
            .filter(|incident| incident.neighborhood == name)
            .cloned()
            .collect()
    }

    /// Returns all incidents whose create-time freshness stamp is set.
    #[must_use]
    pub fn recent(&self) -> Vec<Incident> {
        self.read()
            .incidents
            .values()
            .filter(|incident| incident.is_recent)
            .cloned()
            .collect()
    }

    /// Returns all incidents created at or after `bound`.
    #[must_use]
    pub fn created_since(&self, bound: DateTime<Utc>) -> Vec<Incident> {
        self.read()
            .incidents
            .values()
            .filter(|incident| incident.created_at >= bound)
            .cloned()
            .collect()
    }

    /// Returns all incidents created on or after local midnight of the
    /// current day. The boundary is recomputed on every call; callers
    /// across midnight see the window move.
    #[must_use]
    pub fn today(&self) -> Vec<Incident> {
        self.today_at(Utc::now())
    }

    /// Returns all incidents created on or after local midnight of the
    /// day containing `now`.
    #[must_use]
    pub fn today_at(&self, now: DateTime<Utc>) -> Vec<Incident> {
        self.created_since(local_midnight(now))
    }

    /// Returns all ledger entries in registration order.
    #[must_use]
    pub fn neighborhoods(&self) -> Vec<Neighborhood> {
        self.read().ledger.all()
    }

    /// Exact-match ledger lookup by name. Absence is a valid result.
    #[must_use]
    pub fn neighborhood(&self, name: &str) -> Option<Neighborhood> {
        self.read().ledger.get(name).cloned()
    }

    /// Administrative override of a neighborhood's count. Unknown names
    /// are a no-op.
    pub fn set_neighborhood_count(&self, name: &str, count: u64) {
        self.write().ledger.set_count(name, count);
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().expect("incident store lock poisoned")
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().expect("incident store lock poisoned")
    }
}

/// Local midnight of the day containing `now`, as a UTC instant.
///
/// On DST transition days where local midnight does not exist, falls
/// back to `now` itself, which degenerates to an empty window instead
/// of panicking.
fn local_midnight(now: DateTime<Utc>) -> DateTime<Utc> {
    now.with_timezone(&Local)
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.and_local_timezone(Local).earliest())
        .map_or(now, |midnight| midnight.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sidewalk_map_report_models::{IncidentStatus, IncidentType};

    fn draft(neighborhood: &str) -> IncidentDraft {
        IncidentDraft {
            incident_type: IncidentType::Dog,
            latitude: "37.77490000".to_string(),
            longitude: "-122.41940000".to_string(),
            location: "Market St & 8th St".to_string(),
            neighborhood: neighborhood.to_string(),
            reporter: None,
            status: None,
            image_url: None,
        }
    }

    fn two_neighborhood_seed() -> SeedData {
        SeedData::from_toml(
            r#"
            [[neighborhoods]]
            name = "Tenderloin"
            count = 12

            [[neighborhoods]]
            name = "SOMA"
            count = 9
            "#,
        )
        .unwrap()
    }

    #[test]
    fn create_assigns_strictly_increasing_unique_ids() {
        let store = IncidentStore::new();
        let ids: Vec<i64> = (0..5).map(|_| store.create(draft("SOMA")).id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn create_stamps_now_and_recent() {
        let store = IncidentStore::new();
        let before = Utc::now();
        let incident = store.create(draft("SOMA"));
        let after = Utc::now();
        assert!(incident.is_recent);
        assert!(incident.created_at >= before && incident.created_at <= after);

        // The stamp never changes afterwards.
        let fetched = store.get(incident.id).unwrap();
        assert_eq!(fetched.created_at, incident.created_at);
        assert!(fetched.is_recent);
    }

    #[test]
    fn create_applies_defaults() {
        let store = IncidentStore::new();
        let mut blank = draft("SOMA");
        blank.reporter = Some("   ".to_string());
        blank.image_url = Some(String::new());
        let incident = store.create(blank);
        assert_eq!(incident.reporter, ANONYMOUS_REPORTER);
        assert_eq!(incident.status, IncidentStatus::Pending);
        assert_eq!(incident.image_url, None);
    }

    #[test]
    fn create_keeps_supplied_optionals() {
        let store = IncidentStore::new();
        let mut filled = draft("SOMA");
        filled.reporter = Some("Pat".to_string());
        filled.status = Some(IncidentStatus::Verified);
        filled.image_url = Some("https://img.example/1.jpg".to_string());
        let incident = store.create(filled);
        assert_eq!(incident.reporter, "Pat");
        assert_eq!(incident.status, IncidentStatus::Verified);
        assert_eq!(
            incident.image_url.as_deref(),
            Some("https://img.example/1.jpg")
        );
    }

    #[test]
    fn seeded_scenario_increments_only_the_matching_tally() {
        let store = IncidentStore::seeded(&two_neighborhood_seed());
        let incident = store.create(draft("SOMA"));

        assert_eq!(incident.id, 1);
        assert!(incident.is_recent);
        assert_eq!(incident.status, IncidentStatus::Pending);
        assert_eq!(incident.reporter, ANONYMOUS_REPORTER);
        assert_eq!(store.all().len(), 1);
        assert_eq!(store.neighborhood("SOMA").unwrap().count, 10);
        assert_eq!(store.neighborhood("Tenderloin").unwrap().count, 12);
    }

    #[test]
    fn unknown_neighborhood_stores_report_but_leaves_ledger_unchanged() {
        let store = IncidentStore::seeded(&two_neighborhood_seed());
        let incident = store.create(draft("Unknown Place"));

        assert_eq!(store.get(incident.id).unwrap().neighborhood, "Unknown Place");
        let counts: Vec<u64> = store.neighborhoods().iter().map(|n| n.count).collect();
        assert_eq!(counts, vec![12, 9]);
    }

    #[test]
    fn get_missing_id_is_none() {
        let store = IncidentStore::new();
        assert!(store.get(999).is_none());
    }

    #[test]
    fn by_neighborhood_matches_the_filtered_full_listing() {
        let store = IncidentStore::new();
        store.create(draft("SOMA"));
        store.create(draft("Tenderloin"));
        store.create(draft("SOMA"));
        store.create(draft("soma"));

        let filtered = store.by_neighborhood("SOMA");
        let expected: Vec<i64> = store
            .all()
            .into_iter()
            .filter(|incident| incident.neighborhood == "SOMA")
            .map(|incident| incident.id)
            .collect();
        assert_eq!(
            filtered.iter().map(|i| i.id).collect::<Vec<_>>(),
            expected
        );
        assert_eq!(filtered.len(), 2, "match is case-sensitive");
    }

    #[test]
    fn recent_returns_only_stamped_reports() {
        let seed = SeedData::from_toml(
            r#"
            [[incidents]]
            type = "human"
            latitude = "37.78490000"
            longitude = "-122.40940000"
            location = "Geary St & Leavenworth St"
            neighborhood = "Tenderloin"
            reporter = "Anonymous"
            status = "pending"
            age_minutes = 2
            is_recent = true

            [[incidents]]
            type = "dog"
            latitude = "37.77490000"
            longitude = "-122.41940000"
            location = "Market St & 8th St"
            neighborhood = "SOMA"
            reporter = "Anonymous"
            status = "pending"
            age_minutes = 30
            is_recent = false
            "#,
        )
        .unwrap();
        let store = IncidentStore::seeded(&seed);

        let recent = store.recent();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].location, "Geary St & Leavenworth St");
    }

    #[test]
    fn seeding_backdates_created_at_by_age() {
        let now = Utc::now();
        let seed = SeedData::from_toml(
            r#"
            [[incidents]]
            type = "human"
            latitude = "37.78490000"
            longitude = "-122.40940000"
            location = "Eddy St & Hyde St"
            neighborhood = "Tenderloin"
            reporter = "Anonymous"
            status = "pending"
            age_minutes = 90
            is_recent = false
            "#,
        )
        .unwrap();
        let store = IncidentStore::new();
        store.apply_seed_at(&seed, now);

        let incident = store.get(1).unwrap();
        assert_eq!(incident.created_at, now - Duration::minutes(90));
    }

    #[test]
    fn created_since_uses_an_inclusive_lower_bound() {
        let now = Utc::now();
        let seed = SeedData::from_toml(
            r#"
            [[incidents]]
            type = "human"
            latitude = "37.78490000"
            longitude = "-122.40940000"
            location = "Eddy St & Hyde St"
            neighborhood = "Tenderloin"
            reporter = "Anonymous"
            status = "pending"
            age_minutes = 90
            is_recent = false
            "#,
        )
        .unwrap();
        let store = IncidentStore::new();
        store.apply_seed_at(&seed, now);
        let created_at = now - Duration::minutes(90);

        assert_eq!(store.created_since(created_at).len(), 1);
        assert_eq!(
            store.created_since(created_at + Duration::seconds(1)).len(),
            0
        );
    }

    #[test]
    fn today_includes_fresh_reports_and_excludes_two_days_ago() {
        let seed = SeedData::from_toml(
            r#"
            [[incidents]]
            type = "unknown"
            latitude = "37.79290000"
            longitude = "-122.40570000"
            location = "California St & Mason St"
            neighborhood = "Nob Hill"
            reporter = "Anonymous"
            status = "pending"
            age_minutes = 2880
            is_recent = false
            "#,
        )
        .unwrap();
        let store = IncidentStore::seeded(&seed);
        let fresh = store.create(draft("SOMA"));

        let today: Vec<i64> = store.today().into_iter().map(|i| i.id).collect();
        assert!(today.contains(&fresh.id));
        assert!(!today.contains(&1), "a report from 2 days ago is not today");
    }

    #[test]
    fn set_neighborhood_count_overrides_the_tally() {
        let store = IncidentStore::seeded(&two_neighborhood_seed());
        store.set_neighborhood_count("SOMA", 0);
        assert_eq!(store.neighborhood("SOMA").unwrap().count, 0);
        store.set_neighborhood_count("Nowhere", 7);
        assert_eq!(store.neighborhoods().len(), 2);
    }

    #[test]
    fn ids_continue_after_seeding() {
        let seed = seed::san_francisco();
        let store = IncidentStore::seeded(&seed);
        assert_eq!(store.all().len(), 6);
        let incident = store.create(draft("SOMA"));
        assert_eq!(incident.id, 7);
    }
}
