//! Numeric entity identifiers issued by the backend.
//!
//! Identifiers arrive as JSON numbers but some payloads (notably token
//! claims) carry them as strings, so deserialisation accepts both.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error returned when an identifier cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("identifier must be an integer, got `{value}`")]
pub struct IdParseError {
    value: String,
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "Value", into = "i64")]
        pub struct $name(i64);

        impl $name {
            /// Wrap a raw backend identifier.
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            /// Raw backend identifier.
            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = IdParseError;

            fn from_str(value: &str) -> Result<Self, Self::Err> {
                value
                    .trim()
                    .parse::<i64>()
                    .map(Self)
                    .map_err(|_| IdParseError {
                        value: value.to_owned(),
                    })
            }
        }

        impl From<$name> for i64 {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl TryFrom<Value> for $name {
            type Error = IdParseError;

            fn try_from(value: Value) -> Result<Self, Self::Error> {
                match value {
                    Value::Number(number) => number.as_i64().map(Self).ok_or_else(|| IdParseError {
                        value: number.to_string(),
                    }),
                    Value::String(text) => text.parse(),
                    other => Err(IdParseError {
                        value: other.to_string(),
                    }),
                }
            }
        }
    };
}

entity_id! {
    /// Backend identifier of a user (customer, banker, or administrator).
    UserId
}

entity_id! {
    /// Backend identifier of an account.
    AccountId
}

entity_id! {
    /// Backend identifier of a transaction.
    TransactionId
}

entity_id! {
    /// Backend identifier of a scheduled bill payment.
    PaymentId
}
