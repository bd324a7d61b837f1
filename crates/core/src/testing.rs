//! Test doubles for the authorization provider port
//!
//! Enabled for this crate's unit tests and, through the `test-utils` feature,
//! for downstream integration tests.

// Test helpers document their behaviour through their return types
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use mediaauth_domain::{AuthorizationState, ServiceToken, UserToken};
use parking_lot::Mutex;
use serde_json::{json, Value};

use crate::auth::ports::{AuthorizationProvider, ProviderError};

/// Build a structurally valid service token whose `exp` is `seconds` from now
///
/// Negative values produce an already-expired token.
#[must_use]
pub fn service_token_expiring_in(seconds: i64) -> String {
    let now = Utc::now().timestamp();
    service_token_with_claims(&json!({ "iss": "TESTTEAM01", "iat": now, "exp": now + seconds }))
}

/// Build a service token with an arbitrary payload
#[must_use]
pub fn service_token_with_claims(claims: &Value) -> String {
    let header = json!({ "alg": "ES256", "kid": "TESTKEY001", "typ": "JWT" });
    format!(
        "{}.{}.{}",
        URL_SAFE_NO_PAD.encode(header.to_string()),
        URL_SAFE_NO_PAD.encode(claims.to_string()),
        URL_SAFE_NO_PAD.encode("test-signature")
    )
}

/// Scripted responses; the last entry repeats once the others are consumed
struct Script<T>(Mutex<VecDeque<Result<T, ProviderError>>>);

impl<T: Clone> Script<T> {
    fn new(entries: Vec<Result<T, ProviderError>>) -> Self {
        Self(Mutex::new(entries.into()))
    }

    fn next(&self, exhausted: impl FnOnce() -> ProviderError) -> Result<T, ProviderError> {
        let mut entries = self.0.lock();
        if entries.len() > 1 {
            return entries.pop_front().unwrap_or_else(|| Err(exhausted()));
        }
        entries.front().cloned().unwrap_or_else(|| Err(exhausted()))
    }
}

/// Scripted [`AuthorizationProvider`] that records every call
pub struct MockAuthorizationProvider {
    status: Mutex<AuthorizationState>,
    authorization_outcome: Mutex<Option<Result<AuthorizationState, ProviderError>>>,
    service_tokens: Script<ServiceToken>,
    user_tokens: Script<UserToken>,
    fetch_delay: Option<Duration>,
    authorization_requests: AtomicUsize,
    service_fetches: Mutex<Vec<bool>>,
    user_fetches: Mutex<Vec<(ServiceToken, bool)>>,
}

impl MockAuthorizationProvider {
    /// Provider in `status` that issues one valid service token and `utok-1`
    #[must_use]
    pub fn new(status: AuthorizationState) -> Self {
        Self {
            status: Mutex::new(status),
            authorization_outcome: Mutex::new(None),
            service_tokens: Script::new(vec![Ok(ServiceToken::new(service_token_expiring_in(3600)))]),
            user_tokens: Script::new(vec![Ok(UserToken::new("utok-1"))]),
            fetch_delay: None,
            authorization_requests: AtomicUsize::new(0),
            service_fetches: Mutex::new(Vec::new()),
            user_fetches: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_service_tokens(mut self, script: Vec<Result<ServiceToken, ProviderError>>) -> Self {
        self.service_tokens = Script::new(script);
        self
    }

    #[must_use]
    pub fn with_user_tokens(mut self, script: Vec<Result<UserToken, ProviderError>>) -> Self {
        self.user_tokens = Script::new(script);
        self
    }

    /// Outcome of `request_authorization`; a successful outcome also becomes
    /// the live status
    #[must_use]
    pub fn with_authorization_outcome(
        self,
        outcome: Result<AuthorizationState, ProviderError>,
    ) -> Self {
        *self.authorization_outcome.lock() = Some(outcome);
        self
    }

    /// Suspend every token fetch for `delay`
    #[must_use]
    pub fn with_fetch_delay(mut self, delay: Duration) -> Self {
        self.fetch_delay = Some(delay);
        self
    }

    pub fn set_status(&self, status: AuthorizationState) {
        *self.status.lock() = status;
    }

    #[must_use]
    pub fn authorization_request_count(&self) -> usize {
        self.authorization_requests.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn service_fetch_count(&self) -> usize {
        self.service_fetches.lock().len()
    }

    #[must_use]
    pub fn user_fetch_count(&self) -> usize {
        self.user_fetches.lock().len()
    }

    /// `bypass_cache` flag of every service token fetch, in call order
    #[must_use]
    pub fn service_fetch_bypass_flags(&self) -> Vec<bool> {
        self.service_fetches.lock().clone()
    }

    /// `bypass_cache` flag of every user token fetch, in call order
    #[must_use]
    pub fn user_fetch_bypass_flags(&self) -> Vec<bool> {
        self.user_fetches.lock().iter().map(|(_, bypass)| *bypass).collect()
    }

    /// Service tokens the user token fetches were made with
    #[must_use]
    pub fn user_fetch_service_tokens(&self) -> Vec<ServiceToken> {
        self.user_fetches.lock().iter().map(|(token, _)| token.clone()).collect()
    }

    async fn delay(&self) {
        if let Some(delay) = self.fetch_delay {
            tokio::time::sleep(delay).await;
        }
    }
}

#[async_trait]
impl AuthorizationProvider for MockAuthorizationProvider {
    fn current_status(&self) -> AuthorizationState {
        *self.status.lock()
    }

    async fn request_authorization(&self) -> Result<AuthorizationState, ProviderError> {
        self.authorization_requests.fetch_add(1, Ordering::SeqCst);
        let outcome = self.authorization_outcome.lock().clone();
        match outcome {
            Some(Ok(status)) => {
                self.set_status(status);
                Ok(status)
            }
            Some(Err(err)) => Err(err),
            None => Ok(self.current_status()),
        }
    }

    async fn fetch_service_token(&self, bypass_cache: bool) -> Result<ServiceToken, ProviderError> {
        self.service_fetches.lock().push(bypass_cache);
        self.delay().await;
        self.service_tokens
            .next(|| ProviderError::DeveloperTokenRequestFailed("no scripted token".to_string()))
    }

    async fn fetch_user_token(
        &self,
        service_token: &ServiceToken,
        bypass_cache: bool,
    ) -> Result<UserToken, ProviderError> {
        self.user_fetches.lock().push((service_token.clone(), bypass_cache));
        self.delay().await;
        self.user_tokens
            .next(|| ProviderError::UserTokenRequestFailed("no scripted token".to_string()))
    }
}
