//! Credential value types
//!
//! Both tokens are opaque strings. `Debug` output is redacted so tokens never
//! end up in logs by accident; use [`ServiceToken::as_str`] when the raw
//! value is genuinely needed.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::REDACTED_PREFIX_LEN;

fn redact(raw: &str) -> String {
    let prefix: String = raw.chars().take(REDACTED_PREFIX_LEN).collect();
    format!("{prefix}…({} chars)", raw.chars().count())
}

/// Service ("developer") token identifying the calling application.
///
/// Held exactly as issued or supplied; nothing in the workspace re-encodes it.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceToken(String);

impl ServiceToken {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Log-safe rendering.
    #[must_use]
    pub fn redacted(&self) -> String {
        redact(&self.0)
    }
}

impl fmt::Debug for ServiceToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ServiceToken").field(&self.redacted()).finish()
    }
}

/// User token scoped to one end user and one service token.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserToken(String);

impl UserToken {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    #[must_use]
    pub fn redacted(&self) -> String {
        redact(&self.0)
    }
}

impl fmt::Debug for UserToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("UserToken").field(&self.redacted()).finish()
    }
}

/// Flat per-call options record: `{ "ignoreCache"?: boolean }`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenRequestOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore_cache: Option<bool>,
}

impl TokenRequestOptions {
    #[must_use]
    pub const fn ignore_cache(ignore: bool) -> Self {
        Self { ignore_cache: Some(ignore) }
    }

    /// Effective bypass flag, falling back to the configured default.
    #[must_use]
    pub fn bypass_cache(&self, default: bool) -> bool {
        self.ignore_cache.unwrap_or(default)
    }
}
