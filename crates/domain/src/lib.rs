//! # MediaAuth Domain
//!
//! Authorization and credential types shared by every MediaAuth crate.
//!
//! This crate contains:
//! - Authorization status and token value types
//! - The normalized error taxonomy exposed to callers
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other MediaAuth crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
