use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Superadmin Router Module
///
/// Platform-wide management. Every handler runs the authorization gate for its route
/// before touching any data; a non-superadmin caller is 303'd to their own dashboard
/// without a fetch.
pub fn superadmin_routes() -> Router<AppState> {
    Router::new()
        // GET /superadmin/dashboard
        // Aggregate counters over the whole platform, fetched concurrently.
        .route("/superadmin/dashboard", get(handlers::superadmin_dashboard))
        // GET  /superadmin/businesses?entity=&page=&search=&edit_business_id=
        // POST /superadmin/businesses?action=<company/business mutation>
        // The two-tab companies/businesses page. `edit_business_id` short-circuits to
        // the JSON detail for the edit modal.
        .route(
            "/superadmin/businesses",
            get(handlers::superadmin_businesses).post(handlers::superadmin_businesses_post),
        )
        // GET  /superadmin/users?page=&search=&role=&company=&edit_user_id=
        // POST /superadmin/users?action=create_user|update_user|delete_user
        .route(
            "/superadmin/users",
            get(handlers::superadmin_users).post(handlers::superadmin_users_post),
        )
        // GET  /superadmin/providers?page=&search=
        // POST /superadmin/providers?action=create_provider|update_provider|delete_provider
        .route(
            "/superadmin/providers",
            get(handlers::superadmin_providers).post(handlers::superadmin_providers_post),
        )
}
