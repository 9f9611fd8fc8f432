//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If a required variable is missing, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `ALTOLINK_DB_PATH` (required): SQLite database file path
//! - `ALTOLINK_DB_POOL_SIZE`: Connection pool size (default 4)
//! - `ALTOLINK_BIND_ADDR`: HTTP listen address (default `127.0.0.1:8080`)
//! - `ALTO_ENV`: `sandbox` or `production` (default `sandbox`)
//! - `ALTO_CLIENT_ID`, `ALTO_CLIENT_SECRET` (required): OAuth client
//!   credentials
//! - `ALTO_SCOPE`: OAuth scope (default `api`)
//! - `ALTO_SANDBOX_AUTH_URL`, `ALTO_PRODUCTION_AUTH_URL`: token endpoints
//! - `ALTO_SANDBOX_API_BASE`, `ALTO_PRODUCTION_API_BASE`: API base URLs
//! - `ALTO_TIMEOUT_SECS`: HTTP timeout in seconds (default 30)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./altolink.json` or `./altolink.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};
use std::str::FromStr;

use altolink_domain::{
    AltoConfig, AltoEnvironment, AltoLinkError, Config, DatabaseConfig, Result, ServerConfig,
};

/// Load configuration with automatic fallback strategy
///
/// First attempts to load from environment variables. If any required
/// variables are missing, falls back to loading from a config file.
///
/// # Errors
/// Returns `AltoLinkError::Config` if:
/// - Configuration cannot be loaded from either source
/// - File format is invalid
/// - Required fields are missing or blank
pub fn load() -> Result<Config> {
    let config = match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)?
        }
    };

    validate(&config)?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// # Errors
/// Returns `AltoLinkError::Config` if required variables are missing
/// or have invalid values.
pub fn load_from_env() -> Result<Config> {
    let db_path = env_var("ALTOLINK_DB_PATH")?;
    let pool_size = env_parse::<u32>("ALTOLINK_DB_POOL_SIZE")?.unwrap_or(4);

    let environment = match env_opt("ALTO_ENV") {
        Some(value) => AltoEnvironment::from_str(&value).map_err(AltoLinkError::Config)?,
        None => AltoEnvironment::default(),
    };

    let mut alto =
        AltoConfig::new(environment, env_var("ALTO_CLIENT_ID")?, env_var("ALTO_CLIENT_SECRET")?);

    if let Some(scope) = env_opt("ALTO_SCOPE") {
        alto.scope = scope;
    }
    if let Some(url) = env_opt("ALTO_SANDBOX_AUTH_URL") {
        alto.sandbox_auth_url = url;
    }
    if let Some(url) = env_opt("ALTO_PRODUCTION_AUTH_URL") {
        alto.production_auth_url = url;
    }
    if let Some(url) = env_opt("ALTO_SANDBOX_API_BASE") {
        alto.sandbox_api_base = url;
    }
    if let Some(url) = env_opt("ALTO_PRODUCTION_API_BASE") {
        alto.production_api_base = url;
    }
    if let Some(timeout) = env_parse::<u64>("ALTO_TIMEOUT_SECS")? {
        alto.timeout_secs = timeout;
    }

    let mut server = ServerConfig::default();
    if let Some(addr) = env_opt("ALTOLINK_BIND_ADDR") {
        server.bind_addr = addr;
    }

    Ok(Config { database: DatabaseConfig { path: db_path, pool_size }, alto, server })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `AltoLinkError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
/// - Required fields are missing
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(AltoLinkError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            AltoLinkError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| AltoLinkError::Config(format!("Failed to read config file: {}", e)))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content; format follows the extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| AltoLinkError::Config(format!("Invalid TOML format: {}", e))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| AltoLinkError::Config(format!("Invalid JSON format: {}", e))),
        _ => Err(AltoLinkError::Config(format!("Unsupported config format: {}", extension))),
    }
}

/// Reject configurations that parsed but cannot work.
fn validate(config: &Config) -> Result<()> {
    if config.database.path.trim().is_empty() {
        return Err(AltoLinkError::Config("database path is empty".to_string()));
    }
    if !config.alto.has_credentials() {
        return Err(AltoLinkError::Config(
            "ALTO_CLIENT_ID and ALTO_CLIENT_SECRET must both be set".to_string(),
        ));
    }
    for environment in [AltoEnvironment::Sandbox, AltoEnvironment::Production] {
        url::Url::parse(config.alto.auth_url(environment)).map_err(|e| {
            AltoLinkError::Config(format!("Invalid {environment} token URL: {e}"))
        })?;
        url::Url::parse(config.alto.api_base_url(environment)).map_err(|e| {
            AltoLinkError::Config(format!("Invalid {environment} API base URL: {e}"))
        })?;
    }
    Ok(())
}

/// Probe multiple paths for configuration files
///
/// Searches the current working directory, its parents (up to 2 levels) and
/// the executable's directory. Returns the first config file found.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidate_files(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidate_files(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidate_files(dir: &Path) -> Vec<PathBuf> {
    vec![
        dir.join("config.json"),
        dir.join("config.toml"),
        dir.join("altolink.json"),
        dir.join("altolink.toml"),
        dir.join("../config.json"),
        dir.join("../config.toml"),
        dir.join("../../config.json"),
        dir.join("../../config.toml"),
    ]
}

/// Get required, non-blank environment variable
fn env_var(key: &str) -> Result<String> {
    env_opt(key).ok_or_else(|| {
        AltoLinkError::Config(format!("Missing required environment variable: {}", key))
    })
}

/// Optional environment variable; blank values count as unset.
fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    env_opt(key)
        .map(|raw| {
            raw.parse::<T>()
                .map_err(|e| AltoLinkError::Config(format!("Invalid value for {key}: {e}")))
        })
        .transpose()
}
