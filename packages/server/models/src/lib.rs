#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API request and response types for the sidewalk map server.
//!
//! These types are serialized to JSON for the REST API. They are
//! separate from the stored record types so the wire contract can
//! evolve independently. Creation validation lives here too: the store
//! accepts any well-typed draft, so every field check happens on
//! [`CreateIncidentRequest`] before a draft is built.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sidewalk_map_report_models::{
    Incident, IncidentDraft, IncidentStatus, IncidentType, Neighborhood,
};
use sidewalk_map_stats_models::TodayStats;

/// Neighborhood projected into the fixed `tenderLoin` field of the
/// legacy stats shape.
pub const LEGACY_STATS_NEIGHBORHOOD: &str = "Tenderloin";

/// A sidewalk incident report as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiIncident {
    /// Unique report ID.
    pub id: i64,
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
    /// Photo URL, if one was supplied.
    pub image_url: Option<String>,
    /// When the report entered the store (ISO 8601).
    pub created_at: DateTime<Utc>,
    /// Create-time freshness stamp.
    pub is_recent: bool,
}

impl From<Incident> for ApiIncident {
    fn from(incident: Incident) -> Self {
        Self {
            id: incident.id,
            incident_type: incident.incident_type,
            latitude: incident.latitude,
            longitude: incident.longitude,
            location: incident.location,
            neighborhood: incident.neighborhood,
            reporter: incident.reporter,
            status: incident.status,
            image_url: incident.image_url,
            created_at: incident.created_at,
            is_recent: incident.is_recent,
        }
    }
}

/// A neighborhood tally as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiNeighborhood {
    /// Ledger-assigned ID.
    pub id: i64,
    /// Neighborhood name.
    pub name: String,
    /// Running count of reports attributed to this neighborhood.
    pub count: u64,
}

impl From<Neighborhood> for ApiNeighborhood {
    fn from(neighborhood: Neighborhood) -> Self {
        Self {
            id: neighborhood.id,
            name: neighborhood.name,
            count: neighborhood.count,
        }
    }
}

/// Body of `POST /api/incidents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncidentRequest {
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
    /// Reporter name; blank or absent becomes "Anonymous" in the store.
    #[serde(default)]
    pub reporter: Option<String>,
    /// Initial status; absent becomes `pending` in the store.
    #[serde(default)]
    pub status: Option<IncidentStatus>,
    /// Photo URL.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// One rejected field from creation validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldIssue {
    /// Wire name of the offending field.
    pub field: String,
    /// What was wrong with it.
    pub message: String,
}

impl FieldIssue {
    fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl CreateIncidentRequest {
    /// Checks the required fields of a creation request.
    ///
    /// Required string fields must be non-blank, and coordinates must
    /// parse as decimal numbers. Geographic plausibility is not checked
    /// anywhere; the store accepts whatever passes here.
    ///
    /// # Errors
    ///
    /// Returns every offending field, not just the first.
    pub fn validate(&self) -> Result<(), Vec<FieldIssue>> {
        let mut issues = Vec::new();

        if self.latitude.trim().is_empty() {
            issues.push(FieldIssue::new("latitude", "must not be blank"));
        } else if self.latitude.trim().parse::<f64>().is_err() {
            issues.push(FieldIssue::new("latitude", "must be a decimal number"));
        }
        if self.longitude.trim().is_empty() {
            issues.push(FieldIssue::new("longitude", "must not be blank"));
        } else if self.longitude.trim().parse::<f64>().is_err() {
            issues.push(FieldIssue::new("longitude", "must be a decimal number"));
        }
        if self.location.trim().is_empty() {
            issues.push(FieldIssue::new("location", "must not be blank"));
        }
        if self.neighborhood.trim().is_empty() {
            issues.push(FieldIssue::new("neighborhood", "must not be blank"));
        }

        if issues.is_empty() { Ok(()) } else { Err(issues) }
    }

    /// Converts a validated request into a store draft.
    #[must_use]
    pub fn into_draft(self) -> IncidentDraft {
        IncidentDraft {
            incident_type: self.incident_type,
            latitude: self.latitude,
            longitude: self.longitude,
            location: self.location,
            neighborhood: self.neighborhood,
            reporter: self.reporter,
            status: self.status,
            image_url: self.image_url,
        }
    }
}

/// Response of `GET /api/stats/today`.
///
/// Legacy wire shape: the serialization layer projects the
/// [`LEGACY_STATS_NEIGHBORHOOD`] entry of the generic per-neighborhood
/// breakdown into the fixed `tenderLoin` field that existing clients
/// read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTodayStats {
    /// Reports filed since local midnight.
    pub reports_today: u64,
    /// Today's reports in the Tenderloin.
    pub tender_loin: u64,
    /// Reports near the user (placeholder figure).
    pub near_user: u64,
    /// All reports filed in the trailing hour.
    pub last_hour: u64,
}

impl From<TodayStats> for ApiTodayStats {
    fn from(stats: TodayStats) -> Self {
        Self {
            reports_today: stats.reports_today,
            tender_loin: stats.neighborhood(LEGACY_STATS_NEIGHBORHOOD),
            near_user: stats.near_user,
            last_hour: stats.last_hour,
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}
