//! Credential acquisition, validation and caching
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────┐
//! │ CredentialProvider │  Orchestrator, owns the cache
//! └─────────┬──────────┘
//!           │
//!           ├──► TokenValidator             (caller-supplied service tokens)
//!           ├──► AuthorizationStatusBridge  (live provider status)
//!           ├──► TokenCache                 (service token + user tokens)
//!           ├──► AuthorizationProvider      (native SDK port)
//!           └──► ErrorTaxonomyMapper        (every failure leaves through here)
//! ```
//!
//! # Usage Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use mediaauth_core::{AuthorizationProvider, CredentialProvider};
//!
//! async fn example(native: Arc<dyn AuthorizationProvider>) {
//!     let credentials = CredentialProvider::new(native);
//!
//!     credentials.set_service_token("eyJ...header.eyJ...payload.signature").ok();
//!
//!     match credentials.get_user_token(false).await {
//!         Ok(token) => tracing::info!(len = token.as_str().len(), "user token ready"),
//!         Err(error) => tracing::warn!(code = %error.code(), "user token unavailable"),
//!     }
//! }
//! ```
//!
//! # Module Organization
//!
//! - **[`ports`]**: the `AuthorizationProvider` trait and `ProviderError`
//! - **[`validator`]**: structural and expiry checks for service tokens
//! - **[`status`]**: live authorization status
//! - **[`cache`]**: the token cache
//! - **[`taxonomy`]**: failure-to-`NormalizedError` mapping table
//! - **[`service`]**: the credential provider

pub mod cache;
pub mod ports;
pub mod service;
pub mod status;
pub mod taxonomy;
pub mod validator;
