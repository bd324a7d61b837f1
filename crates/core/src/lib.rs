//! # MediaAuth Core
//!
//! Pure credential logic - no platform or SDK dependencies.
//!
//! This crate contains:
//! - The authorization provider port (trait) the native SDK adapter implements
//! - Service token validation
//! - The token cache and the credential provider that orchestrates it
//! - The error taxonomy mapper
//!
//! ## Architecture Principles
//! - Only depends on `mediaauth-domain`
//! - All external collaborators via traits
//! - Pure, testable business logic

pub mod auth;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

// Re-export specific items to avoid ambiguity
pub use auth::cache::{TokenCache, TokenOrigin};
pub use auth::ports::{AuthorizationProvider, ProviderError};
pub use auth::service::CredentialProvider;
pub use auth::status::AuthorizationStatusBridge;
pub use auth::taxonomy::{CredentialError, ErrorTaxonomyMapper};
pub use auth::validator::{TokenValidator, ValidatedToken, ValidationFailure};
