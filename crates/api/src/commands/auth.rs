//! Credential commands
//!
//! Thin wrappers over `CredentialProvider`: resolve the cache policy, time
//! the call, log the outcome. Token values are never logged.

use std::future::Future;
use std::time::Instant;

use mediaauth_domain::{
    AuthSnapshot, AuthorizationState, NormalizedError, ServiceToken, TokenRequestOptions, UserToken,
};
use tracing::info;

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// Command result crossing the host boundary
pub type CommandResult<T> = Result<T, NormalizedError>;

async fn timed<T, Fut>(command_name: &str, command: Fut) -> CommandResult<T>
where
    Fut: Future<Output = CommandResult<T>>,
{
    let start = Instant::now();
    let result = command.await;
    log_command_execution(command_name, start.elapsed(), result.as_ref().err());
    result
}

/// Current authorization status
pub async fn get_authorization_status(ctx: &AppContext) -> CommandResult<AuthorizationState> {
    timed("auth::get_authorization_status", async {
        Ok(ctx.credentials.status().current_status())
    })
    .await
}

/// Prompt for access; `denied` is returned as a value, not an error
pub async fn request_authorization(ctx: &AppContext) -> CommandResult<AuthorizationState> {
    timed("auth::request_authorization", ctx.credentials.status().request_authorization()).await
}

/// Validate and install a caller-supplied developer token
pub async fn set_developer_token(ctx: &AppContext, token: &str) -> CommandResult<()> {
    let command_name = "auth::set_developer_token";
    info!(command = command_name, token_len = token.len(), "Setting developer token");

    timed(command_name, async { ctx.credentials.set_service_token(token).map(|_| ()) }).await
}

/// Active developer token, fetched from the provider when needed
pub async fn get_developer_token(
    ctx: &AppContext,
    options: TokenRequestOptions,
) -> CommandResult<ServiceToken> {
    let bypass_cache = options.bypass_cache(ctx.default_ignore_cache());
    timed("auth::get_developer_token", ctx.credentials.get_service_token(bypass_cache)).await
}

/// User token for the active developer token
pub async fn get_user_token(
    ctx: &AppContext,
    options: TokenRequestOptions,
) -> CommandResult<UserToken> {
    let bypass_cache = options.bypass_cache(ctx.default_ignore_cache());
    timed("auth::get_user_token", ctx.credentials.get_user_token(bypass_cache)).await
}

/// Request authorization, then fetch a user token if access was granted
pub async fn request_user_token(
    ctx: &AppContext,
    options: TokenRequestOptions,
) -> CommandResult<UserToken> {
    let bypass_cache = options.bypass_cache(ctx.default_ignore_cache());
    timed("auth::request_user_token", ctx.credentials.request_and_get_token(bypass_cache)).await
}

/// Drop every cached credential
pub async fn clear_token_cache(ctx: &AppContext) -> CommandResult<()> {
    timed("auth::clear_token_cache", async {
        ctx.credentials.clear_cache();
        Ok(())
    })
    .await
}

/// Last-known status and cached tokens
pub async fn get_auth_state(ctx: &AppContext) -> CommandResult<AuthSnapshot> {
    timed("auth::get_auth_state", async { Ok(ctx.snapshot()) }).await
}
