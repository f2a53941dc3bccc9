//! Configuration loader
//!
//! Loads the adapter configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If incomplete, falls back to loading from file
//! 3. Searches several locations for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `FINSWITCH_BASE_URL`: Switch base URL (required)
//! - `FINSWITCH_CLIENT_ID`: Client id header value (required)
//! - `FINSWITCH_CLIENT_SECRET`: Credential exchanged for a token (required)
//! - `FINSWITCH_ORGANIZATION_ID`: Organization id (default `223`)
//! - `FINSWITCH_AUTH_ENDPOINT`: Token endpoint path (default `/oauth/token`)
//! - `FINSWITCH_TOKEN_TTL_SECS`: Token lifetime in seconds
//! - `FINSWITCH_TIMEOUT_SECS`: Default request timeout in seconds
//! - `FINSWITCH_VERIFY_TLS`: Whether to verify certificates (true/false)
//! - `FINSWITCH_RETRY_ATTEMPTS`: Total transport attempts
//! - `FINSWITCH_AUDIT_MODULE`: Module name written to audit entries
//!
//! ## File Locations
//! `FINSWITCH_CONFIG` names a file explicitly. Otherwise the loader searches
//! `finswitch.{toml,json}` and `config.{toml,json}` in the working directory,
//! its two parents, and next to the executable.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use finswitch_domain::constants::MAX_TOKEN_TTL_SECS;
use finswitch_domain::{AdapterConfig, FinSwitchError, Result};
use url::Url;

const CONFIG_PATH_VAR: &str = "FINSWITCH_CONFIG";
const FILE_NAMES: [&str; 4] = ["finswitch.toml", "finswitch.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file. The
/// result is validated either way.
///
/// # Errors
/// Returns `FinSwitchError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - The loaded configuration fails [`validate`]
pub fn load() -> Result<AdapterConfig> {
    let config = match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        Err(e) => {
            tracing::debug!(error = %e, "Failed to load from environment, trying file");
            let path = std::env::var(CONFIG_PATH_VAR).ok().map(PathBuf::from);
            load_from_file(path)?
        }
    };
    validate(&config)?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// `FINSWITCH_BASE_URL`, `FINSWITCH_CLIENT_ID` and `FINSWITCH_CLIENT_SECRET`
/// must be present; everything else falls back to the defaults.
///
/// # Errors
/// Returns `FinSwitchError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<AdapterConfig> {
    let defaults = AdapterConfig::default();

    Ok(AdapterConfig {
        base_url: env_var("FINSWITCH_BASE_URL")?,
        client_id: env_var("FINSWITCH_CLIENT_ID")?,
        client_secret: env_var("FINSWITCH_CLIENT_SECRET")?,
        organization_id: env_or("FINSWITCH_ORGANIZATION_ID", defaults.organization_id),
        auth_endpoint: env_or("FINSWITCH_AUTH_ENDPOINT", defaults.auth_endpoint),
        token_ttl_secs: env_parse("FINSWITCH_TOKEN_TTL_SECS", defaults.token_ttl_secs)?,
        default_timeout_secs: env_parse("FINSWITCH_TIMEOUT_SECS", defaults.default_timeout_secs)?,
        verify_tls: env_bool("FINSWITCH_VERIFY_TLS", defaults.verify_tls),
        retry_attempts: env_parse("FINSWITCH_RETRY_ATTEMPTS", defaults.retry_attempts)?,
        audit_module: env_or("FINSWITCH_AUDIT_MODULE", defaults.audit_module),
        ..defaults
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, searches several locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `FinSwitchError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<AdapterConfig> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(FinSwitchError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => find_config_file().ok_or_else(|| {
            FinSwitchError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| FinSwitchError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Check the settings every adapter needs before the first call.
///
/// # Errors
/// Returns `FinSwitchError::Config` for an unparseable or non-HTTP base URL,
/// a token TTL of zero or above [`MAX_TOKEN_TTL_SECS`], or a zero default
/// timeout.
pub fn validate(config: &AdapterConfig) -> Result<()> {
    let url = Url::parse(config.base_url.trim())
        .map_err(|e| FinSwitchError::Config(format!("Invalid base URL '{}': {e}", config.base_url)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(FinSwitchError::Config(format!(
            "Base URL must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if config.token_ttl_secs == 0 {
        return Err(FinSwitchError::Config("Token TTL must be greater than zero".into()));
    }
    if config.token_ttl_secs > MAX_TOKEN_TTL_SECS {
        return Err(FinSwitchError::Config(format!(
            "Token TTL must not exceed {MAX_TOKEN_TTL_SECS} seconds, got {}",
            config.token_ttl_secs
        )));
    }
    if config.default_timeout_secs == 0 {
        return Err(FinSwitchError::Config("Default timeout must be greater than zero".into()));
    }
    Ok(())
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
fn parse_config(contents: &str, path: &Path) -> Result<AdapterConfig> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| FinSwitchError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| FinSwitchError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(FinSwitchError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Search the standard locations for a configuration file
///
/// # Returns
/// The first config file found, or `None` if no file exists.
pub fn find_config_file() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

/// Get required environment variable
///
/// # Errors
/// Returns `FinSwitchError::Config` if the variable is not set or blank.
fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| FinSwitchError::Config(format!("Missing required environment variable: {key}")))
}

fn env_or(key: &str, default: String) -> String {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty()).unwrap_or(default)
}

fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| FinSwitchError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
