//! HTTP handler functions for the sidewalk map API.

use actix_web::{HttpResponse, web};
use chrono::Utc;
use sidewalk_map_server_models::{
    ApiHealth, ApiIncident, ApiNeighborhood, ApiTodayStats, CreateIncidentRequest,
};

use crate::AppState;

/// `GET /api/health`
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: true,
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /api/incidents`
pub async fn list_incidents(state: web::Data<AppState>) -> HttpResponse {
    let incidents: Vec<ApiIncident> = state
        .store
        .all()
        .into_iter()
        .map(ApiIncident::from)
        .collect();
    HttpResponse::Ok().json(incidents)
}

/// `GET /api/incidents/{id}`
pub async fn incident_by_id(state: web::Data<AppState>, path: web::Path<i64>) -> HttpResponse {
    state.store.get(path.into_inner()).map_or_else(
        || {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": "Incident not found"
            }))
        },
        |incident| HttpResponse::Ok().json(ApiIncident::from(incident)),
    )
}

/// `POST /api/incidents`
///
/// Validates the request body, then stores the report. Identity,
/// timestamp, and the freshness stamp come back filled in.
pub async fn create_incident(
    state: web::Data<AppState>,
    body: web::Json<CreateIncidentRequest>,
) -> HttpResponse {
    let request = body.into_inner();
    if let Err(issues) = request.validate() {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invalid incident data",
            "details": issues,
        }));
    }

    let incident = state.store.create(request.into_draft());
    HttpResponse::Created().json(ApiIncident::from(incident))
}

/// `GET /api/incidents/neighborhood/{name}`
pub async fn neighborhood_incidents(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> HttpResponse {
    let incidents: Vec<ApiIncident> = state
        .store
        .by_neighborhood(&path.into_inner())
        .into_iter()
        .map(ApiIncident::from)
        .collect();
    HttpResponse::Ok().json(incidents)
}

/// `GET /api/incidents/recent`
pub async fn recent_incidents(state: web::Data<AppState>) -> HttpResponse {
    let incidents: Vec<ApiIncident> = state
        .store
        .recent()
        .into_iter()
        .map(ApiIncident::from)
        .collect();
    HttpResponse::Ok().json(incidents)
}

/// `GET /api/neighborhoods`
pub async fn neighborhoods(state: web::Data<AppState>) -> HttpResponse {
    let entries: Vec<ApiNeighborhood> = state
        .store
        .neighborhoods()
        .into_iter()
        .map(ApiNeighborhood::from)
        .collect();
    HttpResponse::Ok().json(entries)
}

/// `GET /api/stats/today`
pub async fn todays_stats(state: web::Data<AppState>) -> HttpResponse {
    let stats =
        sidewalk_map_stats::todays_stats(&state.store, state.nearby.as_ref(), Utc::now());
    HttpResponse::Ok().json(ApiTodayStats::from(stats))
}
