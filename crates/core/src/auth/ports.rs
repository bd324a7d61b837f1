//! Port interface for the native authorization SDK
//!
//! The SDK adapter lives outside this workspace; it implements
//! [`AuthorizationProvider`] and reports failures as [`ProviderError`].

use async_trait::async_trait;
use mediaauth_domain::{AuthorizationState, ServiceToken, UserToken};
use thiserror::Error;

/// Failure reasons reported by the native provider
///
/// One flat enum covers every provider-side failure; callers never see it
/// directly because the credential provider maps it through the taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProviderError {
    /// The provider refused the user token because access is not granted
    #[error("Not authorized to access the media service")]
    NotAuthorized,

    /// The user revoked access for this application
    #[error("Media service permission denied")]
    PermissionDenied,

    #[error("User is not signed in to the media service")]
    UserNotSignedIn,

    #[error("Privacy acknowledgement required")]
    PrivacyAcknowledgementRequired,

    #[error("Developer token request failed: {0}")]
    DeveloperTokenRequestFailed(String),

    #[error("User token request failed: {0}")]
    UserTokenRequestFailed(String),

    /// The authorization prompt could not be completed
    #[error("Authorization request failed: {0}")]
    AuthorizationRequestFailed(String),

    #[error("Unknown provider error: {0}")]
    Unknown(String),
}

/// Native authorization and token issuance
///
/// Implementations must be cheap to call concurrently; the credential provider
/// never serializes calls into the port.
#[async_trait]
pub trait AuthorizationProvider: Send + Sync {
    /// Live authorization status, read without caching
    fn current_status(&self) -> AuthorizationState;

    /// Prompt the user for access and report the resulting status
    ///
    /// A `Denied` outcome is returned as `Ok`; `Err` means the prompt itself
    /// failed.
    async fn request_authorization(&self) -> Result<AuthorizationState, ProviderError>;

    /// Issue a service token
    ///
    /// # Arguments
    /// * `bypass_cache` - ask the SDK to skip its own cache as well
    async fn fetch_service_token(&self, bypass_cache: bool) -> Result<ServiceToken, ProviderError>;

    /// Issue a user token for the given service token
    async fn fetch_user_token(
        &self,
        service_token: &ServiceToken,
        bypass_cache: bool,
    ) -> Result<UserToken, ProviderError>;
}
