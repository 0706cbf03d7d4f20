use canal_portal::{
    AppState, SupabaseAuth, SupabaseRepository,
    auth::AuthState,
    config::{AppConfig, Env},
    create_router,
    repository::RepositoryState,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The asynchronous entry point: configuration, logging, collaborator clients, and
/// the HTTP server, in that order.
#[tokio::main]
async fn main() {
    // 1. Configuration & environment loading (fail-fast).
    dotenv::dotenv().ok();
    // AppConfig::load() panics on missing production secrets.
    let config = AppConfig::load();

    // 2. Logging filter setup. RUST_LOG wins; otherwise sensible local defaults.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "canal_portal=debug,tower_http=info,axum=trace".into());

    // 3. Log format selected by environment: pretty for humans, JSON for aggregators.
    match config.env {
        Env::Local => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Application starting in {:?} mode", config.env);

    // 4. Collaborator clients. One reqwest client shared by both; no pool to manage.
    let http = reqwest::Client::new();
    let repo = Arc::new(SupabaseRepository::new(
        http.clone(),
        &config.supabase_url,
        &config.supabase_anon_key,
    )) as RepositoryState;
    let auth = Arc::new(SupabaseAuth::new(
        http,
        &config.supabase_url,
        &config.supabase_anon_key,
        &config.supabase_service_role_key,
    )) as AuthState;

    // 5. Unified state assembly.
    let app_state = AppState { repo, auth, config };

    // 6. Router and server startup.
    let app = create_router(app_state);

    let listener = TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("FATAL: could not bind 0.0.0.0:3000");

    tracing::info!("HTTP server bound successfully.");
    tracing::info!("Listening on 0.0.0.0:3000");

    axum::serve(listener, app)
        .await
        .expect("FATAL: server terminated unexpectedly");
}
