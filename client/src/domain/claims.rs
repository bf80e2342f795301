//! Identity claims carried in the access token.
//!
//! The backend issues JWTs whose payload names the user. The client decodes
//! the payload segment to learn who is signed in; it does not verify the
//! signature, which is the backend's job on every request.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

use super::ids::UserId;
use super::user::{Role, User};

/// Claims read from the access token payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenClaims {
    /// Backend user identifier.
    pub user_id: UserId,
    /// Login name.
    pub username: String,
    /// Granted role.
    pub role: Role,
    /// Whether the user is enabled.
    #[serde(default)]
    pub active: bool,
    /// Expiry as seconds since the Unix epoch, when present.
    #[serde(default)]
    pub exp: Option<i64>,
}

impl AccessTokenClaims {
    /// Session identity built from the claims.
    pub fn to_user(&self) -> User {
        User {
            id: self.user_id,
            username: self.username.clone(),
            role: self.role,
            active: self.active,
        }
    }
}

/// Errors raised while decoding an access token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClaimsError {
    /// The token does not have the `header.payload.signature` shape.
    #[error("access token is not a JWT")]
    Malformed,
    /// The payload segment is not valid base64url.
    #[error("access token payload is not base64url: {message}")]
    Encoding {
        /// Decoder message.
        message: String,
    },
    /// The payload is not JSON with the expected claims.
    #[error("access token claims are invalid: {message}")]
    Claims {
        /// Parser message.
        message: String,
    },
}

/// Decode the identity claims from an access token.
///
/// # Examples
/// ```
/// use banking_client::domain::{decode_access_token, Role};
///
/// // {"userId":7,"username":"alice","role":"CUSTOMER","active":true}
/// let token = "eyJhbGciOiJIUzI1NiJ9.\
///     eyJ1c2VySWQiOjcsInVzZXJuYW1lIjoiYWxpY2UiLCJyb2xlIjoiQ1VTVE9NRVIiLCJhY3RpdmUiOnRydWV9.\
///     c2ln";
/// let claims = decode_access_token(token).unwrap();
/// assert_eq!(claims.username, "alice");
/// assert_eq!(claims.role, Role::Customer);
/// ```
pub fn decode_access_token(token: &str) -> Result<AccessTokenClaims, ClaimsError> {
    let mut segments = token.trim().split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(ClaimsError::Malformed);
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|err| ClaimsError::Encoding {
            message: err.to_string(),
        })?;
    serde_json::from_slice(&bytes).map_err(|err| ClaimsError::Claims {
        message: err.to_string(),
    })
}
