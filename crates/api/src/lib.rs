//! # MediaAuth API
//!
//! Application layer - composition root and command surface.
//!
//! This crate contains:
//! - Application context (dependency injection)
//! - Credential commands (host runtime → credential layer bridge)
//! - A name-based dispatcher for hosts that marshal commands as JSON
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires the native provider adapter into the credential services
//! - Every command failure crosses the boundary as a `NormalizedError`

pub mod commands;
pub mod context;
pub mod utils;

// Re-export for convenience
pub use commands::*;
pub use context::*;
