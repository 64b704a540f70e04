use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://www.sharecare.com";
pub const DEFAULT_MAX_PAGES: u32 = 99;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds a value that cannot be parsed.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable holds a value that cannot be parsed.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; the lookup is injected so tests can drive it
/// from a plain `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let log_level = or_default("PROVDIR_LOG_LEVEL", "info");
    let regions_path = PathBuf::from(or_default(
        "PROVDIR_REGIONS_PATH",
        "./config/regions.yaml",
    ));
    let base_url = or_default("PROVDIR_BASE_URL", DEFAULT_BASE_URL)
        .trim_end_matches('/')
        .to_string();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        return Err(invalid(
            "PROVDIR_BASE_URL",
            format!("\"{base_url}\" must start with http:// or https://"),
        ));
    }
    let search_specialty = or_default("PROVDIR_SEARCH_SPECIALTY", "Dentistry");
    let checkpoint_path = PathBuf::from(or_default("PROVDIR_CHECKPOINT_PATH", "./state.json"));
    let output_path = PathBuf::from(or_default(
        "PROVDIR_OUTPUT_PATH",
        "./provider_details.csv",
    ));

    let request_timeout_secs = parse_u64("PROVDIR_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("PROVDIR_USER_AGENT", "provdir/0.1 (directory-extractor)");
    let max_pages = parse_u32("PROVDIR_MAX_PAGES", &DEFAULT_MAX_PAGES.to_string())?;
    if max_pages == 0 {
        return Err(invalid("PROVDIR_MAX_PAGES", "must be at least 1".into()));
    }
    let inter_request_delay_ms = parse_u64("PROVDIR_INTER_REQUEST_DELAY_MS", "0")?;
    let max_retries = parse_u32("PROVDIR_MAX_RETRIES", "0")?;
    let retry_backoff_base_secs = parse_u64("PROVDIR_RETRY_BACKOFF_BASE_SECS", "5")?;
    let extract_concurrency = parse_usize("PROVDIR_EXTRACT_CONCURRENCY", "1")?;
    if extract_concurrency == 0 {
        return Err(invalid(
            "PROVDIR_EXTRACT_CONCURRENCY",
            "must be at least 1".into(),
        ));
    }

    Ok(AppConfig {
        log_level,
        regions_path,
        base_url,
        search_specialty,
        checkpoint_path,
        output_path,
        request_timeout_secs,
        user_agent,
        max_pages,
        inter_request_delay_ms,
        max_retries,
        retry_backoff_base_secs,
        extract_concurrency,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
