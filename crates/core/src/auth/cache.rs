//! Token cache
//!
//! Holds at most one service token plus the user tokens issued for each
//! service token seen. Every operation runs inside one short critical section;
//! the lock is never held across an `.await`.

use std::collections::HashMap;

use mediaauth_domain::{ServiceToken, UserToken};
use parking_lot::Mutex;
use tracing::debug;

/// Where the cached service token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenOrigin {
    /// Supplied by the application and validated on entry
    Caller,
    /// Issued by the authorization provider
    Provider,
}

#[derive(Debug, Default)]
struct CacheState {
    service_token: Option<(ServiceToken, TokenOrigin)>,
    user_tokens: HashMap<ServiceToken, UserToken>,
}

/// In-memory credential cache keyed by service token value
#[derive(Debug, Default)]
pub struct TokenCache {
    state: Mutex<CacheState>,
}

impl TokenCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached service token, unless `bypass` is set
    #[must_use]
    pub fn get_service_token(&self, bypass: bool) -> Option<ServiceToken> {
        self.get_service_token_with_origin(bypass).map(|(token, _)| token)
    }

    /// Cached service token together with its origin
    #[must_use]
    pub fn get_service_token_with_origin(&self, bypass: bool) -> Option<(ServiceToken, TokenOrigin)> {
        if bypass {
            return None;
        }
        self.state.lock().service_token.clone()
    }

    /// Replace the cached service token
    ///
    /// User tokens cached for other service tokens are left alone; they simply
    /// stop matching. Use [`TokenCache::clear`] for a full reset.
    pub fn set_service_token(&self, token: ServiceToken, origin: TokenOrigin) {
        debug!(token = %token.redacted(), ?origin, "caching service token");
        self.state.lock().service_token = Some((token, origin));
    }

    #[must_use]
    pub fn get_user_token(&self, for_service_token: &ServiceToken, bypass: bool) -> Option<UserToken> {
        if bypass {
            return None;
        }
        self.state.lock().user_tokens.get(for_service_token).cloned()
    }

    pub fn set_user_token(&self, for_service_token: ServiceToken, token: UserToken) {
        self.state.lock().user_tokens.insert(for_service_token, token);
    }

    /// Empty both the service token slot and the user token map at once
    pub fn clear(&self) {
        let mut state = self.state.lock();
        state.service_token = None;
        state.user_tokens.clear();
    }

    /// Number of cached user tokens
    #[must_use]
    pub fn user_token_count(&self) -> usize {
        self.state.lock().user_tokens.len()
    }
}
