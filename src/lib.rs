use axum::{Router, extract::FromRef, http::HeaderName};

use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span};

// --- Module Structure ---

// Core application services and components.
pub mod actions;
pub mod auth;
pub mod config;
pub mod error;
pub mod gate;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod repository;
pub mod templates;
pub mod util;

// Module for routing segregation (public, superadmin, admin, staff).
pub mod routes;
use routes::{admin, public, staff, superadmin};

// --- Public Re-exports ---

// Makes core state types easily accessible to the main application entry point (main.rs).
pub use auth::{AuthState, SupabaseAuth};
pub use config::AppConfig;
pub use repository::{RepositoryState, SupabaseRepository};

/// AppState
///
/// The single, thread-safe, immutable container holding all application services and
/// configuration, shared across all incoming requests.
#[derive(Clone)]
pub struct AppState {
    /// Repository layer: abstracts the hosted PostgREST data collaborator.
    pub repo: RepositoryState,
    /// Auth layer: abstracts the hosted GoTrue identity collaborator.
    pub auth: AuthState,
    /// Configuration: the loaded, immutable environment configuration.
    pub config: AppConfig,
}

// --- Axum FromRef Extractor Implementations ---

// These implementations allow extractors (the session resolver in particular) to pull
// individual components out of the shared AppState.

impl FromRef<AppState> for RepositoryState {
    fn from_ref(app_state: &AppState) -> RepositoryState {
        app_state.repo.clone()
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(app_state: &AppState) -> AuthState {
        app_state.auth.clone()
    }
}

impl FromRef<AppState> for AppConfig {
    fn from_ref(app_state: &AppState) -> AppConfig {
        app_state.config.clone()
    }
}

/// create_router
///
/// Assembles the application's entire routing structure, applies the observability
/// layers, and registers the application state. The role gate runs inside every
/// protected handler (each request must first be resolvable as "maybe anonymous"),
/// so no auth middleware wraps the route groups here.
pub fn create_router(state: AppState) -> Router {
    // Header name constant for request correlation.
    let x_request_id = HeaderName::from_static("x-request-id");

    let base_router = Router::new()
        .merge(public::public_routes())
        .merge(superadmin::superadmin_routes())
        .merge(admin::admin_routes())
        .merge(staff::staff_routes())
        .with_state(state);

    // Observability and correlation layers, applied outermost.
    base_router.layer(
        ServiceBuilder::new()
            // Request ID generation: a unique UUID for every incoming request.
            .layer(SetRequestIdLayer::new(x_request_id.clone(), MakeRequestUuid))
            // Request tracing: wraps the request/response lifecycle in a span carrying
            // the generated request ID.
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(trace_span_logger)
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(tower_http::LatencyUnit::Millis),
                    ),
            )
            // Request ID propagation: returns the x-request-id header to the client.
            .layer(PropagateRequestIdLayer::new(x_request_id)),
    )
}

/// trace_span_logger
///
/// Customizes the `TraceLayer` span so every log line emitted while handling a request
/// is correlated by the generated x-request-id.
fn trace_span_logger(request: &axum::http::Request<axum::body::Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = ?request.method(),
        uri = ?request.uri(),
        req_id = %request_id,
    )
}
