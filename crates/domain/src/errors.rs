//! Error types used throughout the application
//!
//! Two families live here:
//! - [`MediaAuthError`] for configuration failures that never reach
//!   the credential taxonomy.
//! - [`NormalizedError`] and its [`ErrorKind`] / [`ErrorCode`] vocabulary, the
//!   only error shape handed to callers of credential operations.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

/// Main error type for MediaAuth infrastructure
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum MediaAuthError {
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for MediaAuth infrastructure operations
pub type Result<T> = std::result::Result<T, MediaAuthError>;

/// Top-level category of a normalized failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    AuthorizationDenied,
    AuthorizationFailed,
    AuthorizationError,
    TokenError,
}

impl ErrorKind {
    /// Stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AuthorizationDenied => "authorization_denied",
            Self::AuthorizationFailed => "authorization_failed",
            Self::AuthorizationError => "authorization_error",
            Self::TokenError => "token_error",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Machine-readable failure code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotAuthorized,
    AuthFailed,
    InvalidFormat,
    TokenExpired,
    DecodeFailed,
    InvalidToken,
    Unknown,
}

impl ErrorCode {
    /// Stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotAuthorized => "not_authorized",
            Self::AuthFailed => "auth_failed",
            Self::InvalidFormat => "invalid_format",
            Self::TokenExpired => "token_expired",
            Self::DecodeFailed => "decode_failed",
            Self::InvalidToken => "invalid_token",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Code and recoverability attached to every [`NormalizedError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct ErrorDetails {
    pub error_code: ErrorCode,
    /// Advisory only; nothing in this workspace retries on its own.
    pub recoverable: bool,
}

/// Failure shape returned across the command boundary.
///
/// Serializes as
/// `{ "type": kind, "message": ..., "details": { "error_code": ..., "recoverable": ... } }`.
/// Instances are produced by the taxonomy mapper in `mediaauth-core`.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[error("{kind}/{}: {message}", .details.error_code)]
pub struct NormalizedError {
    #[serde(rename = "type")]
    pub kind: ErrorKind,
    pub message: String,
    pub details: ErrorDetails,
}

impl NormalizedError {
    /// Assemble a normalized error from one row of the taxonomy table.
    #[must_use]
    pub fn new(
        kind: ErrorKind,
        error_code: ErrorCode,
        recoverable: bool,
        message: impl Into<String>,
    ) -> Self {
        Self { kind, message: message.into(), details: ErrorDetails { error_code, recoverable } }
    }

    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        self.details.error_code
    }

    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        self.details.recoverable
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_normalized_error_wire_shape() {
        let error = NormalizedError::new(
            ErrorKind::TokenError,
            ErrorCode::TokenExpired,
            true,
            "Invalid developer token: Token has expired",
        );

        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "token_error",
                "message": "Invalid developer token: Token has expired",
                "details": { "error_code": "token_expired", "recoverable": true }
            })
        );

        let back: NormalizedError = serde_json::from_value(value).unwrap();
        assert_eq!(back, error);
    }

    #[test]
    fn test_normalized_error_display() {
        let error = NormalizedError::new(
            ErrorKind::AuthorizationDenied,
            ErrorCode::NotAuthorized,
            false,
            "Not authorized to access the media service",
        );
        assert_eq!(
            error.to_string(),
            "authorization_denied/not_authorized: Not authorized to access the media service"
        );
        assert_eq!(error.code(), ErrorCode::NotAuthorized);
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_labels_match_serde() {
        for code in [
            ErrorCode::NotAuthorized,
            ErrorCode::AuthFailed,
            ErrorCode::InvalidFormat,
            ErrorCode::TokenExpired,
            ErrorCode::DecodeFailed,
            ErrorCode::InvalidToken,
            ErrorCode::Unknown,
        ] {
            assert_eq!(serde_json::to_value(code).unwrap(), json!(code.as_str()));
        }
        for kind in [
            ErrorKind::AuthorizationDenied,
            ErrorKind::AuthorizationFailed,
            ErrorKind::AuthorizationError,
            ErrorKind::TokenError,
        ] {
            assert_eq!(serde_json::to_value(kind).unwrap(), json!(kind.as_str()));
        }
    }

    #[test]
    fn test_media_auth_error_serialization() {
        let error = MediaAuthError::Config("missing file".to_string());
        let value = serde_json::to_value(&error).unwrap();
        assert_eq!(value, json!({ "type": "Config", "message": "missing file" }));
    }
}
