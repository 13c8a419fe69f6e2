#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Read-side statistics aggregation over the incident store.
//!
//! Pure computation for a caller-supplied instant: no stored state, no
//! caching. Repeated calls can return different numbers with no new
//! reports, because a report can leave the trailing-hour window purely
//! through elapsed time.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use sidewalk_map_stats_models::TodayStats;
use sidewalk_map_store::IncidentStore;

/// Source of the "near user" report figure.
///
/// The aggregator does not compute geographic distance itself; that is
/// a proximity collaborator's concern, reached through this seam.
pub trait NearbyCounter: Send + Sync {
    /// Number of reports considered near the user.
    fn nearby_count(&self) -> u64;
}

/// A [`NearbyCounter`] that always answers the same figure.
///
/// Stands in while no real proximity computation is wired up; callers
/// must not assume the value reflects live report positions.
#[derive(Debug, Clone, Copy)]
pub struct FixedNearbyCounter(pub u64);

impl NearbyCounter for FixedNearbyCounter {
    fn nearby_count(&self) -> u64 {
        self.0
    }
}

/// Computes today's aggregate statistics as of `now`.
///
/// `reports_today` and the per-neighborhood breakdown cover reports
/// filed since local midnight of the day containing `now`. `last_hour`
/// covers all reports in the trailing 3600 seconds, today's or not.
#[must_use]
pub fn todays_stats(
    store: &IncidentStore,
    nearby: &dyn NearbyCounter,
    now: DateTime<Utc>,
) -> TodayStats {
    let today = store.today_at(now);

    let mut by_neighborhood: BTreeMap<String, u64> = BTreeMap::new();
    for incident in &today {
        *by_neighborhood
            .entry(incident.neighborhood.clone())
            .or_insert(0) += 1;
    }

    TodayStats {
        reports_today: today.len() as u64,
        by_neighborhood,
        near_user: nearby.nearby_count(),
        last_hour: store.created_since(now - Duration::hours(1)).len() as u64,
    }
}
