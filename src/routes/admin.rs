use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Admin Router Module
///
/// Tenant-scoped management for the admin role. The users page (and its create
/// action) is confined to the caller's own business by construction; the business id
/// always comes from the resolved profile, never from the request.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/dashboard
        // Renders from the resolved profile/business; no data fetch.
        .route("/admin/dashboard", get(handlers::admin_dashboard))
        // GET  /admin/users
        // POST /admin/users?action=create_user
        // Team listing scoped to the caller's business. An admin without a business
        // sees a notice instead of data.
        .route(
            "/admin/users",
            get(handlers::admin_users).post(handlers::admin_users_post),
        )
}
