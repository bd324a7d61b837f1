//! Configuration loader
//!
//! Loads application configuration from files and environment variables.
//!
//! ## Loading Strategy
//! 1. Searches the standard locations for a config file
//! 2. Starts from that file, or from defaults when none exists
//! 3. Applies environment variable overrides on top
//! 4. Supports JSON and TOML formats
//!
//! ## Environment Variables
//! - `MEDIAAUTH_DEVELOPER_TOKEN`: Service token installed at startup
//! - `MEDIAAUTH_IGNORE_CACHE`: Default cache policy for requests without an
//!   explicit flag (true/false)
//! - `MEDIAAUTH_LOG_FILTER`: `tracing` filter directive
//! - `MEDIAAUTH_LOG_JSON`: Emit JSON log lines (true/false)
//!
//! ## File Locations
//! The loader searches the following paths (in order):
//! 1. `./config.json` or `./config.toml` (current working directory)
//! 2. `./mediaauth.json` or `./mediaauth.toml` (current working directory)
//! 3. `../config.json` or `../config.toml` (parent directory)
//! 4. `../../config.json` or `../../config.toml` (grandparent directory)
//! 5. Relative to executable location

use std::path::{Path, PathBuf};

use mediaauth_domain::constants::{
    ENV_DEVELOPER_TOKEN, ENV_IGNORE_CACHE, ENV_LOG_FILTER, ENV_LOG_JSON,
};
use mediaauth_domain::{Config, MediaAuthError, Result};

const CONFIG_FILE_NAMES: [&str; 4] =
    ["config.json", "config.toml", "mediaauth.json", "mediaauth.toml"];

/// Load configuration: first file found (or defaults), then environment overrides
///
/// A missing config file is not an error; every setting has a default.
///
/// # Errors
/// Returns `MediaAuthError::Config` if the file found cannot be read or
/// parsed.
pub fn load() -> Result<Config> {
    let config = match find_config_file() {
        Some(path) => load_from_file(Some(path))?,
        None => {
            tracing::debug!("No config file found, using defaults");
            Config::default()
        }
    };

    Ok(apply_env_overrides(config))
}

/// Load configuration from environment variables over defaults
///
/// # Environment Variables
/// See module documentation for the complete list.
///
/// # Errors
/// Never fails today; the `Result` keeps the signature aligned with the
/// file-based loaders.
pub fn load_from_env() -> Result<Config> {
    let config = apply_env_overrides(Config::default());
    tracing::info!("Configuration loaded from environment variables");
    Ok(config)
}

/// Overlay whichever `MEDIAAUTH_*` variables are set onto `config`
#[must_use]
pub fn apply_env_overrides(mut config: Config) -> Config {
    if let Some(token) = env_string(ENV_DEVELOPER_TOKEN) {
        tracing::debug!(token_len = token.len(), "Developer token supplied via environment");
        config.tokens.developer_token = Some(token);
    }
    config.tokens.default_ignore_cache =
        env_bool(ENV_IGNORE_CACHE, config.tokens.default_ignore_cache);

    if let Some(filter) = env_string(ENV_LOG_FILTER) {
        config.logging.filter = filter;
    }
    config.logging.json = env_bool(ENV_LOG_JSON, config.logging.json);

    config
}

/// Load configuration from a file
///
/// If `path` is `None`, searches multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Arguments
/// * `path` - Optional path to config file. If `None`, uses
///   [`find_config_file`].
///
/// # Errors
/// Returns `MediaAuthError::Config` if:
/// - File not found (when path is specified)
/// - No config file found (when path is `None`)
/// - File format is invalid
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(MediaAuthError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => find_config_file().ok_or_else(|| {
            MediaAuthError::Config(
                "No config file found in any of the standard locations".to_string(),
            )
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| MediaAuthError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content
///
/// Format is detected by file extension (`.json` or `.toml`).
///
/// # Errors
/// Returns `MediaAuthError::Config` if format is invalid or parsing fails.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| MediaAuthError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| MediaAuthError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(MediaAuthError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// Search multiple paths for configuration files
///
/// Searches the current working directory (`config.*`, `mediaauth.*`), its
/// two parents (`config.*`), then the same set relative to the executable.
///
/// # Returns
/// The first config file found, or `None` if no file exists.
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    let mut candidates = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        candidates.extend(candidates_in(&cwd));
    }

    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            candidates.extend(candidates_in(exe_dir));
        }
    }

    candidates.into_iter().find(|path| path.exists())
}

fn candidates_in(dir: &Path) -> Vec<PathBuf> {
    let mut candidates: Vec<PathBuf> =
        CONFIG_FILE_NAMES.iter().map(|name| dir.join(name)).collect();
    for parent in ["..", "../.."] {
        candidates.push(dir.join(parent).join("config.json"));
        candidates.push(dir.join(parent).join("config.toml"));
    }
    candidates
}

/// Non-empty environment variable
fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Parse boolean from environment variable
///
/// Accepts: `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
///
/// # Returns
/// The parsed boolean value, or `default` if not set.
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
