use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
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
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function,
/// so tests can drive it from a plain map.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let non_empty_path = |var: &str, default: &str| -> Result<PathBuf, ConfigError> {
        let raw = or_default(var, default);
        if raw.trim().is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: "path must not be empty".to_string(),
            });
        }
        Ok(PathBuf::from(raw.trim()))
    };

    let settings_path = non_empty_path("REVSCRAPE_SETTINGS_PATH", "./config/settings.yaml")?;
    let input_path = non_empty_path("REVSCRAPE_INPUT_PATH", "./data/inputs.txt")?;
    let output_path = lookup("REVSCRAPE_OUTPUT_PATH")
        .ok()
        .map(|raw| raw.trim().to_string())
        .filter(|raw| !raw.is_empty())
        .map(PathBuf::from);
    let log_level = parse_log_level(&or_default("REVSCRAPE_LOG_LEVEL", "info"))?;

    Ok(AppConfig {
        settings_path,
        input_path,
        output_path,
        log_level,
    })
}

/// Accepts a bare level name (case-insensitive) or a full `EnvFilter`
/// directive string such as `revscrape_scraper=debug,info`.
fn parse_log_level(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "REVSCRAPE_LOG_LEVEL".to_string(),
            reason: "log level must not be empty".to_string(),
        });
    }

    let lower = trimmed.to_ascii_lowercase();
    if LOG_LEVELS.contains(&lower.as_str()) {
        return Ok(lower);
    }
    if trimmed.contains('=') || trimmed.contains(',') {
        return Ok(trimmed.to_string());
    }

    Err(ConfigError::InvalidEnvVar {
        var: "REVSCRAPE_LOG_LEVEL".to_string(),
        reason: format!("unknown level \"{trimmed}\"; expected one of {LOG_LEVELS:?}"),
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
