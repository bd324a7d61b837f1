//! Service token validation
//!
//! Structural and expiry checks only. Signatures are not verified; the token
//! is issued and signed elsewhere.
//!
//! # Rules
//! 1. Exactly three non-empty dot-separated segments
//! 2. Segment two decodes (base64url → base64, `=`-padded) to a JSON object
//!    carrying a numeric `exp` claim
//! 3. `exp` (seconds since epoch) is strictly after the current time

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use mediaauth_domain::constants::{EXPIRATION_CLAIM, SERVICE_TOKEN_SEGMENTS};
use mediaauth_domain::ServiceToken;
use serde_json::{Map, Value};
use thiserror::Error;

/// Why a supplied service token was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationFailure {
    #[error("Invalid JWT format")]
    MalformedToken,

    #[error("Could not decode token payload")]
    UndecodablePayload,

    #[error("Token has expired")]
    ExpiredToken,
}

/// A service token that passed validation, with its decoded claims
#[derive(Debug, Clone)]
pub struct ValidatedToken {
    token: ServiceToken,
    claims: Map<String, Value>,
    expires_at: DateTime<Utc>,
}

impl ValidatedToken {
    /// The token exactly as supplied
    #[must_use]
    pub const fn token(&self) -> &ServiceToken {
        &self.token
    }

    #[must_use]
    pub fn into_token(self) -> ServiceToken {
        self.token
    }

    #[must_use]
    pub const fn claims(&self) -> &Map<String, Value> {
        &self.claims
    }

    #[must_use]
    pub const fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }
}

/// Stateless service token validator
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenValidator;

impl TokenValidator {
    /// Validate against the current wall clock
    ///
    /// # Errors
    /// Returns the first rule the token breaks.
    pub fn validate(token: &str) -> Result<ValidatedToken, ValidationFailure> {
        Self::validate_at(token, Utc::now())
    }

    /// Validate against an explicit instant
    ///
    /// # Errors
    /// Returns the first rule the token breaks.
    pub fn validate_at(
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<ValidatedToken, ValidationFailure> {
        let segments: Vec<&str> = token.split('.').collect();
        if segments.len() != SERVICE_TOKEN_SEGMENTS || segments.iter().any(|s| s.is_empty()) {
            return Err(ValidationFailure::MalformedToken);
        }

        let claims = decode_payload(segments[1])?;
        let exp = claims
            .get(EXPIRATION_CLAIM)
            .and_then(Value::as_f64)
            .ok_or(ValidationFailure::UndecodablePayload)?;

        #[allow(clippy::cast_precision_loss)]
        let now_seconds = now.timestamp_millis() as f64 / 1000.0;
        if exp <= now_seconds {
            return Err(ValidationFailure::ExpiredToken);
        }

        // Past chrono's range only the far future remains.
        #[allow(clippy::cast_possible_truncation)]
        let expires_at = DateTime::<Utc>::from_timestamp_millis((exp * 1000.0).floor() as i64)
            .unwrap_or(DateTime::<Utc>::MAX_UTC);

        Ok(ValidatedToken { token: ServiceToken::new(token), claims, expires_at })
    }
}

/// Translate a base64url segment into padded standard base64
fn base64url_to_base64(segment: &str) -> String {
    let mut base64: String = segment
        .chars()
        .map(|c| match c {
            '-' => '+',
            '_' => '/',
            other => other,
        })
        .collect();
    let remainder = base64.len() % 4;
    if remainder != 0 {
        base64.push_str(&"=".repeat(4 - remainder));
    }
    base64
}

fn decode_payload(segment: &str) -> Result<Map<String, Value>, ValidationFailure> {
    let bytes = STANDARD
        .decode(base64url_to_base64(segment))
        .map_err(|_| ValidationFailure::UndecodablePayload)?;
    match serde_json::from_slice::<Value>(&bytes) {
        Ok(Value::Object(claims)) => Ok(claims),
        _ => Err(ValidationFailure::UndecodablePayload),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for auth::validator.
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use chrono::Duration;
    use serde_json::json;

    use super::*;

    fn encode(value: &Value) -> String {
        URL_SAFE_NO_PAD.encode(value.to_string())
    }

    fn token_with_payload(payload: &Value) -> String {
        format!("{}.{}.c2lnbmF0dXJl", encode(&json!({ "alg": "ES256", "kid": "ABC123" })), encode(payload))
    }

    #[test]
    fn test_malformed_shapes_rejected() {
        for raw in ["", "abc", "a.b", "a.b.c.d", "a..c", ".b.c", "a.b.", "..", "a.b.c."] {
            assert_eq!(
                TokenValidator::validate(raw).unwrap_err(),
                ValidationFailure::MalformedToken,
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn test_undecodable_payloads_rejected() {
        let header = encode(&json!({ "alg": "ES256" }));
        let cases = [
            format!("{header}.!!!notbase64!!!.sig"),
            format!("{header}.{}.sig", URL_SAFE_NO_PAD.encode("not json")),
            format!("{header}.{}.sig", URL_SAFE_NO_PAD.encode("[1,2,3]")),
            token_with_payload(&json!({ "iss": "TEAMID" })),
            token_with_payload(&json!({ "exp": "tomorrow" })),
        ];
        for raw in cases {
            assert_eq!(
                TokenValidator::validate(&raw).unwrap_err(),
                ValidationFailure::UndecodablePayload,
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn test_expiry_boundaries() {
        let now = Utc::now();

        let past = token_with_payload(&json!({ "exp": now.timestamp() - 1 }));
        assert_eq!(
            TokenValidator::validate_at(&past, now).unwrap_err(),
            ValidationFailure::ExpiredToken
        );

        let exact = token_with_payload(&json!({ "exp": 1_700_000_000 }));
        let at = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(TokenValidator::validate_at(&exact, at).unwrap_err(), ValidationFailure::ExpiredToken);

        let future = token_with_payload(&json!({ "exp": now.timestamp() + 3600 }));
        let validated = TokenValidator::validate_at(&future, now).unwrap();
        assert!(validated.expires_at() > now);
        assert!(validated.expires_at() <= now + Duration::seconds(3601));
    }

    #[test]
    fn test_out_of_range_exp_compared_numerically() {
        let now = Utc::now();

        let far_future = token_with_payload(&json!({ "exp": 1e15 }));
        let validated = TokenValidator::validate_at(&far_future, now).unwrap();
        assert_eq!(validated.expires_at(), DateTime::<Utc>::MAX_UTC);

        let far_past = token_with_payload(&json!({ "exp": -1e15 }));
        assert_eq!(
            TokenValidator::validate_at(&far_past, now).unwrap_err(),
            ValidationFailure::ExpiredToken
        );
    }

    #[test]
    fn test_success_returns_token_unchanged() {
        let exp = Utc::now().timestamp() + 3600;
        let raw = token_with_payload(&json!({ "iss": "TEAMID", "iat": exp - 7200, "exp": exp }));

        let validated = TokenValidator::validate(&raw).unwrap();
        assert_eq!(validated.token().as_str(), raw);
        assert_eq!(validated.claims().get("iss"), Some(&json!("TEAMID")));
        assert_eq!(validated.into_token().into_inner(), raw);
    }

    #[test]
    fn test_fractional_exp_accepted() {
        let exp = Utc::now().timestamp() as f64 + 120.5;
        let raw = token_with_payload(&json!({ "exp": exp }));
        assert!(TokenValidator::validate(&raw).is_ok());
    }

    #[test]
    fn test_url_safe_alphabet_translated() {
        // A payload whose encoding contains '-' or '_' must still decode.
        let exp = Utc::now().timestamp() + 3600;
        let payload = json!({ "exp": exp, "sub": "??>>??>>" });
        let encoded = URL_SAFE_NO_PAD.encode(payload.to_string());
        assert!(encoded.contains('-') || encoded.contains('_'));

        let raw = format!("aGVhZGVy.{encoded}.c2ln");
        assert!(TokenValidator::validate(&raw).is_ok());
    }

    #[test]
    fn test_padding_added_to_multiple_of_four() {
        assert_eq!(base64url_to_base64("ab"), "ab==");
        assert_eq!(base64url_to_base64("abc"), "abc=");
        assert_eq!(base64url_to_base64("abcd"), "abcd");
        assert_eq!(base64url_to_base64("a-_b"), "a+/b");
    }
}
