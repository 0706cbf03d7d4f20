use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Staff Router Module
///
/// Landing pages for the two staff roles. Each exists so the gate always has a
/// dashboard to redirect the role to; neither carries list state.
pub fn staff_routes() -> Router<AppState> {
    Router::new()
        // GET /vendedor/proposals
        .route("/vendedor/proposals", get(handlers::vendedor_proposals))
        // GET /tramitador/contracts
        .route("/tramitador/contracts", get(handlers::tramitador_contracts))
}
