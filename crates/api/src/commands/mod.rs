//! Credential commands - host runtime to credential layer bridge

mod auth;
mod dispatch;

pub use auth::*;
pub use dispatch::{invoke, COMMAND_NAMES};
