//! Roles and user identities.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ids::UserId;

/// Role granted to a user; decides which dashboards and endpoints apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Account holder.
    Customer,
    /// Branch staff approving high-value transfers and managing customers.
    Banker,
    /// System administrator managing users.
    Admin,
}

impl Role {
    /// Every role, in display order.
    pub const ALL: [Self; 3] = [Self::Customer, Self::Banker, Self::Admin];

    /// Wire representation of the role.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Customer => "CUSTOMER",
            Self::Banker => "BANKER",
            Self::Admin => "ADMIN",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a role name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role `{0}`; expected CUSTOMER, BANKER, or ADMIN")]
pub struct RoleParseError(String);

impl FromStr for Role {
    type Err = RoleParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim();
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(normalized))
            .ok_or_else(|| RoleParseError(value.to_owned()))
    }
}

/// User identity as held in the session and listed by administrators.
///
/// Serialised as `{"id", "username", "role", "active"}`; this is also the
/// shape persisted under the durable `user` key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Backend identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Granted role.
    pub role: Role,
    /// Whether the account is enabled.
    #[serde(default)]
    pub active: bool,
}

/// Customer entry in the banker's customer listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Backend identifier.
    pub id: UserId,
    /// Login name.
    pub username: String,
    /// Whether the customer may use the bank.
    #[serde(default)]
    pub active: bool,
}
