//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_IGNORE_CACHE, DEFAULT_LOG_FILTER};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub tokens: TokenConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Credential configuration
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenConfig {
    /// Service token installed when the application context starts.
    #[serde(default, skip_serializing)]
    pub developer_token: Option<String>,
    /// Cache policy used when a request carries no `ignoreCache` flag.
    #[serde(default = "default_ignore_cache")]
    pub default_ignore_cache: bool,
}

impl Default for TokenConfig {
    fn default() -> Self {
        Self { developer_token: None, default_ignore_cache: DEFAULT_IGNORE_CACHE }
    }
}

// Never print the configured token itself.
impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenConfig")
            .field("developer_token", &self.developer_token.as_ref().map(|_| "<redacted>"))
            .field("default_ignore_cache", &self.default_ignore_cache)
            .finish()
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// `tracing` filter directive, overridden by `RUST_LOG` when set
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { filter: default_log_filter(), json: false }
    }
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

const fn default_ignore_cache() -> bool {
    DEFAULT_IGNORE_CACHE
}
