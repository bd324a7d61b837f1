//! Error taxonomy
//!
//! [`CredentialError`] is the single internal failure type of the credential
//! layer. [`ErrorTaxonomyMapper::normalize`] is the only place a
//! [`NormalizedError`] is produced from it.
//!
//! | Source condition | kind | code | recoverable |
//! |---|---|---|---|
//! | status `denied` / provider "not authorized" | `authorization_denied` | `not_authorized` | false |
//! | authorization prompt failed | `authorization_failed` | `auth_failed` | true |
//! | malformed supplied token | `token_error` | `invalid_format` | false |
//! | payload undecodable | `token_error` | `decode_failed` | false |
//! | token expired | `token_error` | `token_expired` | true |
//! | service token not issued | `token_error` | `invalid_token` | true |
//! | user token not issued | `token_error` | `invalid_token` | true |
//! | not signed in / privacy acknowledgement / other non-authorized status | `authorization_failed` | `auth_failed` | true |
//! | access revoked | `authorization_denied` | `not_authorized` | true |
//! | anything else | `authorization_error` | `unknown` | false |

use mediaauth_domain::{AuthorizationState, ErrorCode, ErrorKind, NormalizedError};
use thiserror::Error;

use super::ports::ProviderError;
use super::validator::ValidationFailure;

const NOT_AUTHORIZED_MESSAGE: &str = "Not authorized to access the media service";
const AUTHORIZATION_FAILED_MESSAGE: &str = "Failed to get media service authorization";

/// Every failure the credential layer can produce
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    /// A user token was requested while the status was not `authorized`
    #[error("Not authorized (status: {0})")]
    NotAuthorized(AuthorizationState),

    #[error("Authorization request failed: {0}")]
    AuthorizationRequestFailed(String),

    #[error("Invalid developer token: {0}")]
    InvalidServiceToken(ValidationFailure),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// A request that could not be interpreted (unknown operation, bad
    /// arguments)
    #[error("{0}")]
    InvalidRequest(String),
}

impl From<ValidationFailure> for CredentialError {
    fn from(failure: ValidationFailure) -> Self {
        Self::InvalidServiceToken(failure)
    }
}

/// Deterministic failure-to-taxonomy mapping
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorTaxonomyMapper;

impl ErrorTaxonomyMapper {
    /// Map a credential failure to exactly one taxonomy row
    #[must_use]
    pub fn normalize(error: &CredentialError) -> NormalizedError {
        match error {
            CredentialError::NotAuthorized(status) => Self::from_status(*status),
            CredentialError::AuthorizationRequestFailed(_) => authorization_failed(),
            CredentialError::InvalidServiceToken(failure) => Self::from_validation(*failure),
            CredentialError::Provider(provider) => Self::from_provider(provider),
            CredentialError::InvalidRequest(message) => unknown(message.clone()),
        }
    }

    /// Row for a user-token request made while not authorized
    #[must_use]
    pub fn from_status(status: AuthorizationState) -> NormalizedError {
        match status {
            AuthorizationState::Denied => NormalizedError::new(
                ErrorKind::AuthorizationDenied,
                ErrorCode::NotAuthorized,
                false,
                NOT_AUTHORIZED_MESSAGE,
            ),
            AuthorizationState::NotDetermined => {
                Self::from_provider(&ProviderError::UserNotSignedIn)
            }
            AuthorizationState::Restricted => {
                Self::from_provider(&ProviderError::PrivacyAcknowledgementRequired)
            }
            // `authorized` never reaches here in practice; `unknown` is still a
            // not-authorized state and stays in the authorization family.
            AuthorizationState::Authorized | AuthorizationState::Unknown => authorization_failed(),
        }
    }

    #[must_use]
    pub fn from_validation(failure: ValidationFailure) -> NormalizedError {
        let (code, recoverable) = match failure {
            ValidationFailure::MalformedToken => (ErrorCode::InvalidFormat, false),
            ValidationFailure::UndecodablePayload => (ErrorCode::DecodeFailed, false),
            ValidationFailure::ExpiredToken => (ErrorCode::TokenExpired, true),
        };
        NormalizedError::new(
            ErrorKind::TokenError,
            code,
            recoverable,
            format!("Invalid developer token: {failure}"),
        )
    }

    #[must_use]
    pub fn from_provider(error: &ProviderError) -> NormalizedError {
        match error {
            ProviderError::NotAuthorized => NormalizedError::new(
                ErrorKind::AuthorizationDenied,
                ErrorCode::NotAuthorized,
                false,
                NOT_AUTHORIZED_MESSAGE,
            ),
            ProviderError::PermissionDenied => NormalizedError::new(
                ErrorKind::AuthorizationDenied,
                ErrorCode::NotAuthorized,
                true,
                error.to_string(),
            ),
            ProviderError::UserNotSignedIn | ProviderError::PrivacyAcknowledgementRequired => {
                NormalizedError::new(
                    ErrorKind::AuthorizationFailed,
                    ErrorCode::AuthFailed,
                    true,
                    error.to_string(),
                )
            }
            ProviderError::AuthorizationRequestFailed(_) => authorization_failed(),
            ProviderError::DeveloperTokenRequestFailed(_)
            | ProviderError::UserTokenRequestFailed(_) => NormalizedError::new(
                ErrorKind::TokenError,
                ErrorCode::InvalidToken,
                true,
                error.to_string(),
            ),
            ProviderError::Unknown(_) => unknown(error.to_string()),
        }
    }
}

impl From<CredentialError> for NormalizedError {
    fn from(error: CredentialError) -> Self {
        ErrorTaxonomyMapper::normalize(&error)
    }
}

fn authorization_failed() -> NormalizedError {
    NormalizedError::new(
        ErrorKind::AuthorizationFailed,
        ErrorCode::AuthFailed,
        true,
        AUTHORIZATION_FAILED_MESSAGE,
    )
}

fn unknown(message: String) -> NormalizedError {
    NormalizedError::new(ErrorKind::AuthorizationError, ErrorCode::Unknown, false, message)
}
