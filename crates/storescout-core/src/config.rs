use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an invalid value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files; use it when the
/// caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any env var holds an invalid value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so tests can drive it from a plain `HashMap` lookup without touching
/// `set_var`/`remove_var`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let google_api_key = lookup("GOOGLE_API_KEY").ok();
    let google_cse_id = lookup("GOOGLE_CSE_ID").ok();

    let log_level = or_default("STORESCOUT_LOG_LEVEL", "info");
    let queries_path = lookup("STORESCOUT_QUERIES_PATH").ok().map(PathBuf::from);

    let user_agent = or_default(
        "STORESCOUT_USER_AGENT",
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36",
    );
    let fetch_timeout_secs = parse_u64("STORESCOUT_FETCH_TIMEOUT_SECS", "15")?;
    let search_delay_ms = parse_u64("STORESCOUT_SEARCH_DELAY_MS", "1000")?;

    let verify_batch_size = parse_usize("STORESCOUT_VERIFY_BATCH_SIZE", "5")?;
    if verify_batch_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "STORESCOUT_VERIFY_BATCH_SIZE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let verify_batch_delay_ms = parse_u64("STORESCOUT_VERIFY_BATCH_DELAY_MS", "1000")?;

    Ok(AppConfig {
        google_api_key,
        google_cse_id,
        log_level,
        queries_path,
        user_agent,
        fetch_timeout_secs,
        search_delay_ms,
        verify_batch_size,
        verify_batch_delay_ms,
    })
}
