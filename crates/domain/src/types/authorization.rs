//! Authorization status types
//!
//! The status is owned by the external provider; these types only render it.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;

use super::token::{ServiceToken, UserToken};

/// Provider authorization state as seen by callers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub enum AuthorizationState {
    Authorized,
    Denied,
    NotDetermined,
    Restricted,
    Unknown,
}

impl AuthorizationState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Authorized => "authorized",
            Self::Denied => "denied",
            Self::NotDetermined => "notDetermined",
            Self::Restricted => "restricted",
            Self::Unknown => "unknown",
        }
    }

    #[must_use]
    pub const fn is_authorized(self) -> bool {
        matches!(self, Self::Authorized)
    }
}

impl fmt::Display for AuthorizationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognized labels collapse to [`AuthorizationState::Unknown`].
impl FromStr for AuthorizationState {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "authorized" => Self::Authorized,
            "denied" => Self::Denied,
            "notDetermined" => Self::NotDetermined,
            "restricted" => Self::Restricted,
            _ => Self::Unknown,
        })
    }
}

/// Last-known authorization view mirrored by UI layers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct AuthSnapshot {
    pub status: AuthorizationState,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts-gen", ts(type = "string | null"))]
    pub developer_token: Option<ServiceToken>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[cfg_attr(feature = "ts-gen", ts(type = "string | null"))]
    pub user_token: Option<UserToken>,
}

impl AuthSnapshot {
    #[must_use]
    pub const fn new(status: AuthorizationState) -> Self {
        Self { status, developer_token: None, user_token: None }
    }
}
