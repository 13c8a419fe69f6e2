//! Compile-time seed dataset for store initialization.
//!
//! The startup dataset is embedded as TOML via `include_str!`. It lists
//! neighborhoods with their starting tallies and a handful of incidents,
//! each carrying an `age_minutes` backdation relative to process start.
//! Seeding is a one-time initialization, not a recurring interface.

use serde::Deserialize;
use sidewalk_map_report_models::{IncidentStatus, IncidentType};
use thiserror::Error;

/// Embedded San Francisco startup dataset.
const SAN_FRANCISCO_TOML: &str = include_str!("../seeds/san_francisco.toml");

/// Error parsing a seed dataset.
#[derive(Debug, Error)]
pub enum SeedError {
    /// The TOML document failed to parse or did not match the schema.
    #[error("Invalid seed dataset: {0}")]
    Parse(#[from] toml::de::Error),
}

/// A complete startup dataset: neighborhoods plus backdated incidents.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedData {
    /// Neighborhoods to register, in ledger-ID order.
    #[serde(default)]
    pub neighborhoods: Vec<SeedNeighborhood>,
    /// Incidents to insert, in report-ID order.
    #[serde(default)]
    pub incidents: Vec<SeedIncident>,
}

impl SeedData {
    /// Parses a seed dataset from a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SeedError`] if the document is not valid TOML or does
    /// not match the seed schema.
    pub fn from_toml(document: &str) -> Result<Self, SeedError> {
        Ok(toml::de::from_str(document)?)
    }
}

/// A neighborhood entry in the seed dataset.
///
/// The starting count already includes the seeded incidents, so applying
/// the seed registers the ledger entry without incrementing it.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedNeighborhood {
    /// Neighborhood name.
    pub name: String,
    /// Starting report tally.
    pub count: u64,
}

/// An incident entry in the seed dataset.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedIncident {
    /// What was reported.
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    /// Latitude as a decimal string.
    pub latitude: String,
    /// Longitude as a decimal string.
    pub longitude: String,
    /// Free-text street description.
    pub location: String,
    /// Neighborhood name.
    pub neighborhood: String,
    /// Reporter name.
    pub reporter: String,
    /// Cleanup lifecycle state.
    pub status: IncidentStatus,
    /// Minutes before the seeding instant that this report was filed.
    pub age_minutes: i64,
    /// Freshness stamp. Seed records may carry `false`; only live
    /// creation forces `true`.
    pub is_recent: bool,
}

/// Returns the embedded San Francisco startup dataset.
///
/// # Panics
///
/// Panics if the embedded TOML fails to parse. The document is a
/// compile-time constant, so a parse failure indicates a development
/// error and is caught by the tests below.
#[must_use]
pub fn san_francisco() -> SeedData {
    SeedData::from_toml(SAN_FRANCISCO_TOML)
        .unwrap_or_else(|e| panic!("Failed to parse San Francisco seed dataset: {e}"))
}
