use std::env;

/// AppConfig
///
/// Holds the application's entire configuration state. This struct is designed to be
/// immutable once loaded, ensuring consistency across all threads and services
/// (Repository, AuthService). It is pulled into the application state via FromRef.
#[derive(Clone)]
pub struct AppConfig {
    // Base URL of the hosted Supabase project (GoTrue under /auth/v1, PostgREST under /rest/v1).
    pub supabase_url: String,
    // Public (anon) API key, sent as the `apikey` header on every collaborator call.
    pub supabase_anon_key: String,
    // Service-role key for privilege-escalated auth-admin calls (create/delete identities,
    // password resets on behalf of other users).
    pub supabase_service_role_key: String,
    // Policy for the second step of composite writes (business+style, identity+profile).
    pub write_consistency: WriteConsistency,
    // Runtime environment marker. Controls log format and local fallbacks.
    pub env: Env,
}

/// Env
///
/// Defines the runtime context, used to switch between development conveniences
/// (pretty logs, local Supabase defaults) and production infrastructure (JSON logs,
/// mandatory secrets).
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

/// WriteConsistency
///
/// Composite writes (create business then upsert its style; create auth identity then
/// insert its profile) are not transactional: the collaborator offers no transaction
/// spanning two calls. `BestEffort` keeps the original behavior of reporting the partial
/// failure and leaving the first write in place. `Compensate` deletes the first write
/// when the second one fails on the create paths.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum WriteConsistency {
    BestEffort,
    Compensate,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// This allows us to instantiate the configuration without needing to set environment
    /// variables for lightweight unit or integration testing state scaffolding.
    fn default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_anon_key: "local-anon-key".to_string(),
            supabase_service_role_key: "local-service-role-key".to_string(),
            write_consistency: WriteConsistency::BestEffort,
            env: Env::Local,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at startup.
    /// It reads all parameters from environment variables and implements the fail-fast
    /// principle.
    ///
    /// # Panics
    /// Panics if a critical environment variable required for the current runtime
    /// environment (especially Production) is not found. This prevents the application
    /// from starting with an incomplete or insecure configuration.
    pub fn load() -> Self {
        let env_str = env::var("APP_ENV").unwrap_or_else(|_| "local".to_string());
        let env = match env_str.as_str() {
            "production" => Env::Production,
            _ => Env::Local,
        };

        let write_consistency = match env::var("WRITE_CONSISTENCY").as_deref() {
            Ok("compensate") => WriteConsistency::Compensate,
            _ => WriteConsistency::BestEffort,
        };

        match env {
            Env::Local => Self {
                env: Env::Local,
                // Defaults match the local Supabase CLI stack so a bare `cargo run` works
                // against `supabase start`.
                supabase_url: env::var("SUPABASE_URL")
                    .unwrap_or_else(|_| "http://localhost:54321".to_string()),
                supabase_anon_key: env::var("SUPABASE_ANON_KEY")
                    .unwrap_or_else(|_| "local-anon-key".to_string()),
                supabase_service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY")
                    .unwrap_or_else(|_| "local-service-role-key".to_string()),
                write_consistency,
            },
            Env::Production => Self {
                env: Env::Production,
                supabase_url: env::var("SUPABASE_URL")
                    .expect("FATAL: SUPABASE_URL required in prod"),
                supabase_anon_key: env::var("SUPABASE_ANON_KEY")
                    .expect("FATAL: SUPABASE_ANON_KEY required in prod"),
                supabase_service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY")
                    .expect("FATAL: SUPABASE_SERVICE_ROLE_KEY required in prod"),
                write_consistency,
            },
        }
    }
}
