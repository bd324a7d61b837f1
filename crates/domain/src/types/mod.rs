//! Domain types and models

pub mod authorization;
pub mod token;

pub use authorization::{AuthSnapshot, AuthorizationState};
pub use token::{ServiceToken, TokenRequestOptions, UserToken};
