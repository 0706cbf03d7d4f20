use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, post},
};

/// Public Router Module
///
/// The only endpoints reachable without a session: the root redirect, the login
/// pair, logout and the liveness probe. Everything else in the application sits
/// behind the authorization gate.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Unauthenticated probe for monitoring and load balancers.
        .route("/health", get(handlers::health))
        // GET /
        // Pure router: role dashboard for signed-in callers, /login otherwise.
        .route("/", get(handlers::root))
        // GET /login: the sign-in form (with optional ?error= inline message).
        // POST /login: password sign-in; sets both session cookies on success.
        .route("/login", get(handlers::login_form).post(handlers::login_submit))
        // POST /logout
        // Clears both session cookies and returns to /login.
        .route("/logout", post(handlers::logout))
}
