#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Actix-Web API server for the sidewalk map application.
//!
//! Serves the REST API over the in-memory incident store and the static
//! front-end bundle. The store is constructed and seeded once here and
//! injected into the handlers through [`AppState`]; request validation
//! happens in the server models before any draft reaches the store.

mod handlers;

use std::sync::Arc;

use actix_cors::Cors;
use actix_files::Files;
use actix_web::{App, HttpServer, middleware, web};
use sidewalk_map_stats::{FixedNearbyCounter, NearbyCounter};
use sidewalk_map_store::{IncidentStore, seed};

/// Placeholder "near user" figure until a real proximity collaborator
/// is wired in.
const NEAR_USER_PLACEHOLDER: u64 = 8;

/// Shared application state.
pub struct AppState {
    /// The authoritative in-memory incident store.
    pub store: Arc<IncidentStore>,
    /// Proximity collaborator for the stats endpoint.
    pub nearby: Arc<dyn NearbyCounter>,
}

/// Starts the sidewalk map API server.
///
/// Seeds a fresh store from the embedded San Francisco dataset, then
/// binds the Actix-Web HTTP server on `BIND_ADDR`/`PORT` (defaults
/// `127.0.0.1:8080`). This is a regular async function; the caller
/// provides the runtime (e.g. via `#[actix_web::main]`).
///
/// # Errors
///
/// Returns an `std::io::Result` error if the HTTP server fails to bind
/// or encounters a runtime error.
#[allow(clippy::future_not_send)]
pub async fn run_server() -> std::io::Result<()> {
    pretty_env_logger::init_custom_env("RUST_LOG");

    log::info!("Seeding incident store...");
    let store = Arc::new(IncidentStore::seeded(&seed::san_francisco()));
    log::info!(
        "Seeded {} incidents across {} neighborhoods",
        store.all().len(),
        store.neighborhoods().len()
    );

    let state = web::Data::new(AppState {
        store,
        nearby: Arc::new(FixedNearbyCounter(NEAR_USER_PLACEHOLDER)),
    });

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1".to_string());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    log::info!("Starting server on {bind_addr}:{port}");

    HttpServer::new(move || {
        let cors = Cors::permissive();

        App::new()
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .app_data(state.clone())
            .service(
                web::scope("/api")
                    .route("/health", web::get().to(handlers::health))
                    .route("/incidents", web::get().to(handlers::list_incidents))
                    .route("/incidents", web::post().to(handlers::create_incident))
                    // Literal routes must precede the {id} route or they
                    // would be captured as ids.
                    .route("/incidents/recent", web::get().to(handlers::recent_incidents))
                    .route(
                        "/incidents/neighborhood/{name}",
                        web::get().to(handlers::neighborhood_incidents),
                    )
                    .route("/incidents/{id}", web::get().to(handlers::incident_by_id))
                    .route("/neighborhoods", web::get().to(handlers::neighborhoods))
                    .route("/stats/today", web::get().to(handlers::todays_stats)),
            )
            // Serve frontend static files (production)
            .service(Files::new("/", "app/dist").index_file("index.html"))
    })
    .bind((bind_addr, port))?
    .run()
    .await
}
