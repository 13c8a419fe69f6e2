#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Aggregate statistics result types for the sidewalk map.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Point-in-time aggregate statistics over the incident store.
///
/// Every field is computed fresh for a single instant; nothing is
/// cached, so two calls can differ purely because wall-clock time
/// advanced. Per-neighborhood counts are a generic map; projecting a
/// fixed named field for a legacy wire shape is the serialization
/// layer's job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayStats {
    /// Reports filed since local midnight.
    pub reports_today: u64,
    /// Today's reports broken down by neighborhood name.
    pub by_neighborhood: BTreeMap<String, u64>,
    /// Reports near the user, sourced from a proximity collaborator.
    /// With no real computation wired in this is a fixed placeholder,
    /// not a derived value.
    pub near_user: u64,
    /// All reports (not just today's) filed in the trailing hour.
    pub last_hour: u64,
}

impl TodayStats {
    /// Today's report count for a single neighborhood, 0 when the name
    /// has no reports today.
    #[must_use]
    pub fn neighborhood(&self, name: &str) -> u64 {
        self.by_neighborhood.get(name).copied().unwrap_or(0)
    }
}
