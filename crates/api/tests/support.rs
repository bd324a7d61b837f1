//! Shared fixtures for command integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use mediaauth_core::testing::MockAuthorizationProvider;
use mediaauth_domain::{AuthorizationState, Config};
use mediaauth_lib::context::AppContext;

/// Context wired to a scripted provider; the mock stays reachable for
/// assertions on call counts.
pub struct TestContext {
    pub ctx: AppContext,
    pub provider: Arc<MockAuthorizationProvider>,
}

/// Context over `provider` with default configuration.
pub fn setup_with(provider: MockAuthorizationProvider) -> TestContext {
    setup_with_config(provider, Config::default())
}

/// Context over `provider` with an explicit configuration.
pub fn setup_with_config(provider: MockAuthorizationProvider, config: Config) -> TestContext {
    let provider = Arc::new(provider);
    let ctx = AppContext::new_with_config(config, provider.clone());
    TestContext { ctx, provider }
}

/// Authorized provider with the default token scripts.
pub fn setup_authorized() -> TestContext {
    setup_with(MockAuthorizationProvider::new(AuthorizationState::Authorized))
}
