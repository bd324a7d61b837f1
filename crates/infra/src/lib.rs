//! # MediaAuth Infrastructure
//!
//! The impure edges of the credential layer.
//!
//! This crate contains:
//! - Configuration loading (environment variables, JSON/TOML files)
//! - Tracing subscriber setup
//!
//! ## Architecture
//! - Depends on `mediaauth-domain` only
//! - Native SDK adapters implement `mediaauth_core::AuthorizationProvider`
//!   outside this workspace

pub mod config;
pub mod observability;

// Re-export commonly used items
pub use config::{load, load_from_env, load_from_file, find_config_file};
pub use observability::init_tracing;
