//! Application context - dependency injection container

use std::sync::Arc;

use mediaauth_core::{AuthorizationProvider, CredentialProvider};
use mediaauth_domain::{AuthSnapshot, Config, Result};
use tracing::{info, warn};

/// Application context - holds the credential services and their config
///
/// One per process; hosts keep it behind an `Arc` and hand `&AppContext` to
/// the command functions.
pub struct AppContext {
    pub config: Config,
    pub credentials: Arc<CredentialProvider>,
}

impl AppContext {
    /// Create a context from `.env`, config files and environment variables
    ///
    /// # Errors
    /// Returns `MediaAuthError::Config` if a config file exists but cannot be
    /// read or parsed.
    pub fn new(provider: Arc<dyn AuthorizationProvider>) -> Result<Self> {
        match dotenvy::dotenv() {
            Ok(path) => info!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => {}
            Err(e) => warn!(error = %e, "Could not load .env file"),
        }

        let config = mediaauth_infra::load()?;
        Ok(Self::new_with_config(config, provider))
    }

    /// Create a context with an explicit configuration
    ///
    /// A configured developer token is validated and installed; an invalid one
    /// is logged and skipped so the provider can still issue tokens.
    #[must_use]
    pub fn new_with_config(config: Config, provider: Arc<dyn AuthorizationProvider>) -> Self {
        let credentials = Arc::new(CredentialProvider::new(provider));

        if let Some(token) = config.tokens.developer_token.as_deref() {
            match credentials.set_service_token(token) {
                Ok(validated) => {
                    info!(expires_at = %validated.expires_at(), "Configured developer token installed");
                }
                Err(err) => warn!(
                    error_code = %err.code(),
                    message = %err.message,
                    "Ignoring configured developer token"
                ),
            }
        }

        info!(
            default_ignore_cache = config.tokens.default_ignore_cache,
            status = %credentials.status().current_status(),
            "Application context ready"
        );

        Self { config, credentials }
    }

    /// Cache policy for requests that carry no `ignoreCache` flag
    #[must_use]
    pub const fn default_ignore_cache(&self) -> bool {
        self.config.tokens.default_ignore_cache
    }

    /// Current status plus cached tokens, without fetching
    #[must_use]
    pub fn snapshot(&self) -> AuthSnapshot {
        self.credentials.snapshot()
    }
}
