//! Integration tests for the credential provider
//!
//! Drives `CredentialProvider` end to end through the scripted provider:
//! caller-supplied tokens, provider issuance, cache policy, authorization
//! gating and concurrent access.

use std::sync::Arc;
use std::time::Duration;

use mediaauth_core::testing::{
    service_token_expiring_in, service_token_with_claims, MockAuthorizationProvider,
};
use mediaauth_core::{CredentialProvider, ProviderError};
use mediaauth_domain::{AuthorizationState, ErrorCode, ErrorKind, ServiceToken, UserToken};
use serde_json::json;

fn credentials_for(
    mock: MockAuthorizationProvider,
) -> (Arc<MockAuthorizationProvider>, Arc<CredentialProvider>) {
    let mock = Arc::new(mock);
    let credentials = Arc::new(CredentialProvider::new(mock.clone()));
    (mock, credentials)
}

#[tokio::test]
async fn test_supplied_token_flows_into_user_token_fetch() {
    let (mock, credentials) =
        credentials_for(MockAuthorizationProvider::new(AuthorizationState::Authorized));
    let supplied = service_token_expiring_in(3600);

    credentials.set_service_token(&supplied).expect("valid token");
    let user_token = credentials.get_user_token(false).await.expect("user token");

    assert_eq!(user_token, UserToken::new("utok-1"));
    assert_eq!(mock.service_fetch_count(), 0);
    assert_eq!(mock.user_fetch_service_tokens(), vec![ServiceToken::new(supplied)]);
}

#[tokio::test]
async fn test_validation_failures_carry_distinct_codes() {
    let (_mock, credentials) =
        credentials_for(MockAuthorizationProvider::new(AuthorizationState::Authorized));

    let cases = [
        ("only.two".to_string(), ErrorCode::InvalidFormat, false),
        ("a.b.c.d".to_string(), ErrorCode::InvalidFormat, false),
        ("head.%%%%.sig".to_string(), ErrorCode::DecodeFailed, false),
        (service_token_with_claims(&json!({ "sub": "no-exp" })), ErrorCode::DecodeFailed, false),
        (service_token_expiring_in(-60), ErrorCode::TokenExpired, true),
    ];

    for (token, code, recoverable) in cases {
        let error = credentials.set_service_token(&token).expect_err("token must be rejected");
        assert_eq!(error.kind, ErrorKind::TokenError, "{token}");
        assert_eq!(error.code(), code, "{token}");
        assert_eq!(error.is_recoverable(), recoverable, "{token}");
    }

    assert!(credentials.snapshot().developer_token.is_none());
}

#[tokio::test]
async fn test_cached_provider_token_reused_until_bypass() {
    let first = ServiceToken::new(service_token_expiring_in(3600));
    let second = ServiceToken::new(service_token_expiring_in(7200));
    let (mock, credentials) = credentials_for(
        MockAuthorizationProvider::new(AuthorizationState::Authorized)
            .with_service_tokens(vec![Ok(first.clone()), Ok(second.clone())]),
    );

    assert_eq!(credentials.get_service_token(false).await.expect("fetch"), first);
    assert_eq!(credentials.get_service_token(false).await.expect("cached"), first);
    assert_eq!(credentials.get_service_token(true).await.expect("bypass"), second);
    assert_eq!(credentials.get_service_token(false).await.expect("cached"), second);

    assert_eq!(mock.service_fetch_bypass_flags(), vec![false, true]);
}

#[tokio::test]
async fn test_status_change_is_observed_on_next_request() {
    let (mock, credentials) =
        credentials_for(MockAuthorizationProvider::new(AuthorizationState::Authorized));
    credentials.get_user_token(false).await.expect("authorized fetch");

    mock.set_status(AuthorizationState::Denied);
    let error = credentials.get_user_token(false).await.expect_err("denied");

    assert_eq!(error.kind, ErrorKind::AuthorizationDenied);
    assert_eq!(error.code(), ErrorCode::NotAuthorized);
    assert_eq!(mock.user_fetch_count(), 1);
}

#[tokio::test]
async fn test_failed_user_fetch_then_success() {
    let (mock, credentials) = credentials_for(
        MockAuthorizationProvider::new(AuthorizationState::Authorized).with_user_tokens(vec![
            Err(ProviderError::UserTokenRequestFailed("network unreachable".to_string())),
            Ok(UserToken::new("utok-2")),
        ]),
    );

    let error = credentials.get_user_token(false).await.expect_err("first fetch fails");
    assert_eq!(error.kind, ErrorKind::TokenError);
    assert_eq!(error.code(), ErrorCode::InvalidToken);
    assert!(error.is_recoverable());

    assert_eq!(credentials.get_user_token(false).await.expect("retry"), UserToken::new("utok-2"));
    assert_eq!(mock.user_fetch_count(), 2);
}

#[tokio::test]
async fn test_unknown_provider_failure_maps_to_unknown() {
    let (_mock, credentials) = credentials_for(
        MockAuthorizationProvider::new(AuthorizationState::Authorized)
            .with_service_tokens(vec![Err(ProviderError::Unknown("sdk crashed".to_string()))]),
    );

    let error = credentials.get_user_token(false).await.expect_err("unknown failure");
    assert_eq!(error.kind, ErrorKind::AuthorizationError);
    assert_eq!(error.code(), ErrorCode::Unknown);
    assert!(!error.is_recoverable());
}

#[tokio::test]
async fn test_request_authorization_failure_surfaces_auth_failed() {
    let (mock, credentials) = credentials_for(
        MockAuthorizationProvider::new(AuthorizationState::NotDetermined).with_authorization_outcome(
            Err(ProviderError::AuthorizationRequestFailed("prompt unavailable".to_string())),
        ),
    );

    let error = credentials.request_and_get_token(false).await.expect_err("prompt failed");
    assert_eq!(error.kind, ErrorKind::AuthorizationFailed);
    assert_eq!(error.code(), ErrorCode::AuthFailed);
    assert_eq!(mock.authorization_request_count(), 1);
    assert_eq!(mock.user_fetch_count(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_user_token_requests_all_succeed() {
    let (mock, credentials) = credentials_for(
        MockAuthorizationProvider::new(AuthorizationState::Authorized)
            .with_fetch_delay(Duration::from_millis(20)),
    );

    let requests = (0..8).map(|_| {
        let credentials = Arc::clone(&credentials);
        async move { credentials.get_user_token(false).await }
    });
    let results = futures::future::join_all(requests).await;

    for result in results {
        assert_eq!(result.expect("concurrent fetch"), UserToken::new("utok-1"));
    }
    // Concurrent misses may each fetch; afterwards the cache serves every call.
    let fetched = mock.user_fetch_count();
    assert!(fetched >= 1);
    credentials.get_user_token(false).await.expect("cached");
    assert_eq!(mock.user_fetch_count(), fetched);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_clear_during_in_flight_fetch() {
    let (mock, credentials) = credentials_for(
        MockAuthorizationProvider::new(AuthorizationState::Authorized)
            .with_fetch_delay(Duration::from_millis(50)),
    );

    let in_flight = {
        let credentials = Arc::clone(&credentials);
        tokio::spawn(async move { credentials.get_user_token(false).await })
    };
    tokio::time::sleep(Duration::from_millis(10)).await;
    credentials.clear_cache();

    let result = in_flight.await.expect("task joined");
    assert_eq!(result.expect("in-flight fetch completes"), UserToken::new("utok-1"));

    // The cache stays usable after a clear raced with a fetch.
    credentials.clear_cache();
    assert_eq!(credentials.get_user_token(false).await.expect("fresh"), UserToken::new("utok-1"));
    assert!(mock.user_fetch_count() >= 2);
}

#[tokio::test]
async fn test_supplied_token_replaces_provider_token() {
    let (mock, credentials) =
        credentials_for(MockAuthorizationProvider::new(AuthorizationState::Authorized));
    let issued = credentials.get_service_token(false).await.expect("issued");

    let supplied = service_token_expiring_in(1800);
    credentials.set_service_token(&supplied).expect("valid token");

    let active = credentials.get_service_token(false).await.expect("active");
    assert_ne!(active, issued);
    assert_eq!(active.as_str(), supplied);
    assert_eq!(mock.service_fetch_count(), 1);
}
