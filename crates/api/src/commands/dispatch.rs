//! Name-based command dispatch
//!
//! Hosts that marshal calls as `(name, json args)` go through [`invoke`].
//! Results and failures are plain JSON; failures always carry the
//! normalized `{ type, message, details }` shape.

use mediaauth_core::{CredentialError, ErrorTaxonomyMapper};
use mediaauth_domain::{NormalizedError, TokenRequestOptions};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::auth;
use crate::context::AppContext;

/// Every command name [`invoke`] understands
pub const COMMAND_NAMES: [&str; 8] = [
    "getAuthorizationStatus",
    "requestAuthorization",
    "setDeveloperToken",
    "getDeveloperToken",
    "getUserToken",
    "requestUserToken",
    "clearTokenCache",
    "getAuthState",
];

#[derive(Debug, Deserialize)]
struct SetDeveloperTokenArgs {
    token: String,
}

/// Run the command called `name` with JSON `args`
///
/// `args` may be `null` for commands without arguments or with only
/// optional ones.
///
/// # Errors
/// The command's own `NormalizedError`, or `authorization_error/unknown`
/// for an unknown name or arguments that do not fit the command.
pub async fn invoke(ctx: &AppContext, name: &str, args: Value) -> Result<Value, NormalizedError> {
    debug!(command = name, "Dispatching command");

    match name {
        "getAuthorizationStatus" => to_json(auth::get_authorization_status(ctx).await?),
        "requestAuthorization" => to_json(auth::request_authorization(ctx).await?),
        "setDeveloperToken" => {
            let SetDeveloperTokenArgs { token } = parse_args(name, args)?;
            auth::set_developer_token(ctx, &token).await?;
            Ok(Value::Null)
        }
        "getDeveloperToken" => {
            let options = parse_options(name, args)?;
            to_json(auth::get_developer_token(ctx, options).await?)
        }
        "getUserToken" => {
            let options = parse_options(name, args)?;
            to_json(auth::get_user_token(ctx, options).await?)
        }
        "requestUserToken" => {
            let options = parse_options(name, args)?;
            to_json(auth::request_user_token(ctx, options).await?)
        }
        "clearTokenCache" => {
            auth::clear_token_cache(ctx).await?;
            Ok(Value::Null)
        }
        "getAuthState" => to_json(auth::get_auth_state(ctx).await?),
        unknown => Err(invalid_request(format!("Unknown command: {unknown}"))),
    }
}

fn parse_args<T: DeserializeOwned>(name: &str, args: Value) -> Result<T, NormalizedError> {
    serde_json::from_value(args)
        .map_err(|e| invalid_request(format!("Invalid arguments for {name}: {e}")))
}

fn parse_options(name: &str, args: Value) -> Result<TokenRequestOptions, NormalizedError> {
    if args.is_null() {
        return Ok(TokenRequestOptions::default());
    }
    parse_args(name, args)
}

fn to_json<T: Serialize>(value: T) -> Result<Value, NormalizedError> {
    serde_json::to_value(value)
        .map_err(|e| invalid_request(format!("Failed to encode command result: {e}")))
}

fn invalid_request(message: String) -> NormalizedError {
    ErrorTaxonomyMapper::normalize(&CredentialError::InvalidRequest(message))
}
