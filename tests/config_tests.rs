use canal_portal::config::{AppConfig, Env, WriteConsistency};
use serial_test::serial;
use std::{env, panic};

// --- Setup/Teardown Utilities ---

/// Runs a test body and restores the named environment variables afterward, whether
/// the body passed or panicked.
fn run_with_env<T, R>(test: T, cleanup_vars: Vec<&'static str>) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    let originals: Vec<(String, Option<String>)> = cleanup_vars
        .iter()
        .map(|&var| (var.to_string(), env::var(var).ok()))
        .collect();

    let result = panic::catch_unwind(test);

    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(&key, val);
            } else {
                env::remove_var(&key);
            }
        }
    }

    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_production_fail_fast() {
    let cleanup_vars = vec![
        "APP_ENV",
        "SUPABASE_URL",
        "SUPABASE_ANON_KEY",
        "SUPABASE_SERVICE_ROLE_KEY",
        "WRITE_CONSISTENCY",
    ];
    run_with_env(
        || {
            let result = panic::catch_unwind(|| {
                unsafe {
                    env::set_var("APP_ENV", "production");
                    env::remove_var("SUPABASE_URL");
                    env::remove_var("SUPABASE_ANON_KEY");
                    env::remove_var("SUPABASE_SERVICE_ROLE_KEY");
                }
                AppConfig::load()
            });
            assert!(result.is_err(), "production load must panic without SUPABASE_URL");
        },
        cleanup_vars,
    );
}

#[test]
#[serial]
fn test_app_config_local_uses_fallbacks() {
    let cleanup_vars = vec![
        "APP_ENV",
        "SUPABASE_URL",
        "SUPABASE_ANON_KEY",
        "SUPABASE_SERVICE_ROLE_KEY",
        "WRITE_CONSISTENCY",
    ];
    run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "local");
                env::remove_var("SUPABASE_URL");
                env::remove_var("SUPABASE_ANON_KEY");
                env::remove_var("SUPABASE_SERVICE_ROLE_KEY");
                env::remove_var("WRITE_CONSISTENCY");
            }
            let config = AppConfig::load();
            assert_eq!(config.env, Env::Local);
            assert_eq!(config.supabase_url, "http://localhost:54321");
            assert_eq!(config.write_consistency, WriteConsistency::BestEffort);
        },
        cleanup_vars,
    );
}

#[test]
#[serial]
fn test_write_consistency_opt_in() {
    let cleanup_vars = vec!["APP_ENV", "WRITE_CONSISTENCY"];
    run_with_env(
        || {
            unsafe {
                env::set_var("APP_ENV", "local");
                env::set_var("WRITE_CONSISTENCY", "compensate");
            }
            let config = AppConfig::load();
            assert_eq!(config.write_consistency, WriteConsistency::Compensate);

            // Unknown values fall back to the default policy.
            unsafe {
                env::set_var("WRITE_CONSISTENCY", "two-phase-commit");
            }
            let config = AppConfig::load();
            assert_eq!(config.write_consistency, WriteConsistency::BestEffort);
        },
        cleanup_vars,
    );
}
