//! Application constants
//!
//! Centralized location for domain-level constants used throughout the
//! application.

// Environment variables read by the configuration loader
pub const ENV_DEVELOPER_TOKEN: &str = "MEDIAAUTH_DEVELOPER_TOKEN";
pub const ENV_IGNORE_CACHE: &str = "MEDIAAUTH_IGNORE_CACHE";
pub const ENV_LOG_FILTER: &str = "MEDIAAUTH_LOG_FILTER";
pub const ENV_LOG_JSON: &str = "MEDIAAUTH_LOG_JSON";

// Configuration defaults
pub const DEFAULT_LOG_FILTER: &str = "info";
pub const DEFAULT_IGNORE_CACHE: bool = false;

// Service token shape
pub const SERVICE_TOKEN_SEGMENTS: usize = 3;
pub const EXPIRATION_CLAIM: &str = "exp";

/// Number of leading characters kept when a token is rendered for logs.
pub const REDACTED_PREFIX_LEN: usize = 6;
