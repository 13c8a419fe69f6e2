#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident and neighborhood record types for the sidewalk map.
//!
//! This crate defines the canonical record shapes shared across the
//! store, stats, and server crates. Coordinates travel as fixed-precision
//! decimal strings and are never range-checked here; geographic
//! plausibility is the reporting client's problem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// What was reported on the sidewalk.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IncidentType {
    /// Human waste.
    Human,
    /// Dog waste.
    Dog,
    /// Reporter could not tell.
    Unknown,
}

impl IncidentType {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Human, Self::Dog, Self::Unknown]
    }
}

/// Cleanup lifecycle state of a report.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum IncidentStatus {
    /// Newly reported, not yet confirmed.
    #[default]
    Pending,
    /// Confirmed by a second party.
    Verified,
    /// Cleaned up.
    Cleaned,
}

impl IncidentStatus {
    /// Returns all variants of this enum.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Pending, Self::Verified, Self::Cleaned]
    }
}

/// A stored sidewalk incident report.
///
/// `id`, `created_at`, and `is_recent` are assigned by the store at
/// creation and never change afterwards. `is_recent` is a create-time
/// stamp, not a rolling window: a report stays "recent" even after the
/// today/last-hour queries have aged it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    /// Unique report ID, monotonically assigned from 1.
    pub id: i64,
    /// What was reported.
    #[serde(rename = "type")]
    pub incident_type: IncidentType,
    /// Latitude as a decimal string (8 fractional digits).
    pub latitude: String,
    /// Longitude as a decimal string (8 fractional digits).
    pub longitude: String,
    /// Free-text street description (e.g. "Geary St & Leavenworth St").
    pub location: String,
    /// Neighborhood name, matched against the ledger by exact equality.
    pub neighborhood: String,
    /// Who reported it. Defaults to "Anonymous".
    pub reporter: String,
    /// Cleanup lifecycle state.
    pub status: IncidentStatus,
    /// URL of an uploaded photo, if one was supplied.
    pub image_url: Option<String>,
    /// When the report entered the store.
    pub created_at: DateTime<Utc>,
    /// Create-time freshness stamp, immutable thereafter.
    pub is_recent: bool,
}

/// The caller-supplied portion of a new incident report.
///
/// Identity, timestamp, and the freshness stamp are assigned by the
/// store. Field-level validation happens at the request boundary before
/// a draft is built; the store accepts any well-typed draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncidentDraft {
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
    /// Reporter name; `None` or blank becomes "Anonymous".
    pub reporter: Option<String>,
    /// Initial status; `None` becomes `pending`.
    pub status: Option<IncidentStatus>,
    /// Photo URL; `None` or blank is stored as absent.
    pub image_url: Option<String>,
}

/// A neighborhood with its running report tally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Neighborhood {
    /// Ledger-assigned ID, unique per name.
    pub id: i64,
    /// Neighborhood name, unique, the lookup key.
    pub name: String,
    /// Running count of reports attributed to this neighborhood.
    pub count: u64,
}
