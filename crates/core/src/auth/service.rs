//! Credential provider
//!
//! Orchestrates service and user token acquisition:
//! - Caller-supplied service tokens are validated before they are cached
//! - Provider-issued service tokens are trusted as issued
//! - A cached caller token is re-checked on read; once expired the provider
//!   is asked instead
//! - User tokens require a live `authorized` status and are cached per
//!   service token
//! - Every failure leaves through the taxonomy mapper
//!
//! Cache policy: the caller's `bypass_cache` flag is respected on every call
//! and is forwarded to the provider on a fetch.

use std::sync::Arc;

use mediaauth_domain::{AuthSnapshot, AuthorizationState, NormalizedError, ServiceToken, UserToken};
use tracing::{debug, info, warn};

use super::cache::{TokenCache, TokenOrigin};
use super::ports::AuthorizationProvider;
use super::status::AuthorizationStatusBridge;
use super::taxonomy::{CredentialError, ErrorTaxonomyMapper};
use super::validator::{TokenValidator, ValidatedToken};

/// Owner of the token cache and the single active service token
///
/// Create one per composition root and share it behind an `Arc`.
pub struct CredentialProvider {
    provider: Arc<dyn AuthorizationProvider>,
    status: AuthorizationStatusBridge,
    cache: TokenCache,
}

impl CredentialProvider {
    #[must_use]
    pub fn new(provider: Arc<dyn AuthorizationProvider>) -> Self {
        let status = AuthorizationStatusBridge::new(Arc::clone(&provider));
        Self { provider, status, cache: TokenCache::new() }
    }

    /// Status bridge backed by the same provider
    #[must_use]
    pub const fn status(&self) -> &AuthorizationStatusBridge {
        &self.status
    }

    /// Resolve the active service token
    ///
    /// Returns the cached token (caller-supplied or previously issued) unless
    /// `bypass_cache` is set, otherwise asks the provider and caches the result.
    ///
    /// # Errors
    /// `token_error/invalid_token` when the provider cannot issue a token, or
    /// the mapped provider failure.
    pub async fn get_service_token(&self, bypass_cache: bool) -> Result<ServiceToken, NormalizedError> {
        self.resolve_service_token(bypass_cache).await.map_err(normalize)
    }

    /// Resolve a user token for the active service token
    ///
    /// # Errors
    /// - `authorization_denied` / `authorization_failed` when the live status
    ///   is not `authorized` (no provider call is made)
    /// - any mapped failure from resolving the service token or fetching the
    ///   user token
    pub async fn get_user_token(&self, bypass_cache: bool) -> Result<UserToken, NormalizedError> {
        self.resolve_user_token(bypass_cache).await.map_err(normalize)
    }

    /// Validate and install a caller-supplied service token
    ///
    /// The cache is only touched when validation succeeds.
    ///
    /// # Errors
    /// `token_error` with `invalid_format`, `decode_failed` or
    /// `token_expired` depending on the validation failure.
    pub fn set_service_token(&self, token: &str) -> Result<ValidatedToken, NormalizedError> {
        let validated = TokenValidator::validate(token)
            .map_err(|failure| normalize(CredentialError::InvalidServiceToken(failure)))?;

        self.cache.set_service_token(validated.token().clone(), TokenOrigin::Caller);
        info!(expires_at = %validated.expires_at(), "Developer token set");
        Ok(validated)
    }

    /// Drop every cached credential; safe to call at any time
    pub fn clear_cache(&self) {
        self.cache.clear();
        info!("Token cache cleared");
    }

    /// Request authorization, then fetch a user token if it was granted
    ///
    /// # Errors
    /// The mapped failure of the prompt, the taxonomy entry for a
    /// non-authorized outcome, or any user-token failure.
    pub async fn request_and_get_token(&self, bypass_cache: bool) -> Result<UserToken, NormalizedError> {
        let status = self.status.request_authorization().await?;
        if !status.is_authorized() {
            return Err(normalize(CredentialError::NotAuthorized(status)));
        }
        self.get_user_token(bypass_cache).await
    }

    /// Current status plus whatever is cached, without contacting the provider
    /// for tokens
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        let developer_token = self.cache.get_service_token(false);
        let user_token =
            developer_token.as_ref().and_then(|token| self.cache.get_user_token(token, false));
        AuthSnapshot { status: self.status.current_status(), developer_token, user_token }
    }

    async fn resolve_service_token(&self, bypass_cache: bool) -> Result<ServiceToken, CredentialError> {
        match self.cache.get_service_token_with_origin(bypass_cache) {
            Some((token, TokenOrigin::Provider)) => {
                debug!("Provider-issued service token served from cache");
                return Ok(token);
            }
            // Caller tokens carry their own `exp`; one that lapsed while cached
            // is replaced by a provider token.
            Some((token, TokenOrigin::Caller)) => match TokenValidator::validate(token.as_str()) {
                Ok(_) => {
                    debug!("Caller-supplied service token served from cache");
                    return Ok(token);
                }
                Err(failure) => {
                    info!(%failure, "Cached developer token no longer valid, fetching from provider");
                }
            },
            None => {}
        }

        debug!(bypass_cache, "Fetching service token from provider");
        let token = self.provider.fetch_service_token(bypass_cache).await?;
        self.cache.set_service_token(token.clone(), TokenOrigin::Provider);
        Ok(token)
    }

    async fn resolve_user_token(&self, bypass_cache: bool) -> Result<UserToken, CredentialError> {
        let status = self.status.current_status();
        if status != AuthorizationState::Authorized {
            return Err(CredentialError::NotAuthorized(status));
        }

        let service_token = self.resolve_service_token(bypass_cache).await?;
        if let Some(user_token) = self.cache.get_user_token(&service_token, bypass_cache) {
            debug!("User token served from cache");
            return Ok(user_token);
        }

        debug!(bypass_cache, "Fetching user token from provider");
        let user_token = self.provider.fetch_user_token(&service_token, bypass_cache).await?;
        self.cache.set_user_token(service_token, user_token.clone());
        Ok(user_token)
    }
}

fn normalize(error: CredentialError) -> NormalizedError {
    let normalized = ErrorTaxonomyMapper::normalize(&error);
    warn!(
        error = %error,
        kind = %normalized.kind,
        code = %normalized.code(),
        recoverable = normalized.is_recoverable(),
        "Credential operation failed"
    );
    normalized
}
