//! Live authorization status

use std::sync::Arc;

use mediaauth_domain::{AuthorizationState, NormalizedError};
use tracing::{info, warn};

use super::ports::AuthorizationProvider;
use super::taxonomy::{CredentialError, ErrorTaxonomyMapper};

/// Renders the provider's authorization state; never caches it
#[derive(Clone)]
pub struct AuthorizationStatusBridge {
    provider: Arc<dyn AuthorizationProvider>,
}

impl AuthorizationStatusBridge {
    #[must_use]
    pub fn new(provider: Arc<dyn AuthorizationProvider>) -> Self {
        Self { provider }
    }

    /// Current provider state
    #[must_use]
    pub fn current_status(&self) -> AuthorizationState {
        self.provider.current_status()
    }

    /// Prompt for access and return whatever state the provider lands in
    ///
    /// `Denied` is a normal outcome and comes back as `Ok`.
    ///
    /// # Errors
    /// `authorization_failed/auth_failed` when the prompt itself could not
    /// complete.
    pub async fn request_authorization(&self) -> Result<AuthorizationState, NormalizedError> {
        info!("Starting authorization request");
        match self.provider.request_authorization().await {
            Ok(status) => {
                info!(%status, "Authorization request finished");
                Ok(status)
            }
            Err(err) => {
                warn!(error = %err, "Authorization request failed");
                Err(ErrorTaxonomyMapper::normalize(&CredentialError::AuthorizationRequestFailed(
                    err.to_string(),
                )))
            }
        }
    }
}
