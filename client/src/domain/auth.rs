//! Authentication payloads: credentials, registration, and issued tokens.
//!
//! Constructors validate raw string inputs so the auth API port only ever
//! sees well-formed requests.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};
use zeroize::Zeroizing;

use super::user::Role;

/// Error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Username was missing or blank once trimmed.
    EmptyUsername,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUsername => write!(f, "username must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

fn serialize_secret<S: Serializer>(secret: &Zeroizing<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.as_str())
}

/// Validated login credentials, the body of `POST /auth/login`.
///
/// ## Invariants
/// - `username` is trimmed and must not be empty after trimming.
/// - `password` is required to be non-empty but retains caller-provided
///   whitespace to avoid surprising credential comparisons.
///
/// # Examples
/// ```
/// use banking_client::domain::{LoginCredentials, Role};
///
/// let creds = LoginCredentials::try_from_parts("alice", "password", Role::Customer).unwrap();
/// assert_eq!(creds.username(), "alice");
/// assert_eq!(creds.role(), Role::Customer);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginCredentials {
    username: String,
    #[serde(serialize_with = "serialize_secret")]
    password: Zeroizing<String>,
    role: Role,
}

impl LoginCredentials {
    /// Construct credentials from raw username/password inputs.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<Self, LoginValidationError> {
        let normalized = username.trim();
        if normalized.is_empty() {
            return Err(LoginValidationError::EmptyUsername);
        }

        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            username: normalized.to_owned(),
            password: Zeroizing::new(password.to_owned()),
            role,
        })
    }

    /// Username string sent to the backend.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Role the user is signing in as.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Body of `POST /auth/register`.
///
/// Built by [`crate::domain::validation::RegisterForm::validate`], which
/// enforces the username and password rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub(crate) username: String,
    #[serde(serialize_with = "serialize_secret")]
    pub(crate) password: Zeroizing<String>,
    pub(crate) role: Role,
}

impl Registration {
    /// Username being registered.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Requested role.
    pub fn role(&self) -> Role {
        self.role
    }
}

/// Tokens issued by `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    /// Short-lived bearer token.
    pub access_token: String,
    /// Long-lived token used to mint new access tokens.
    pub refresh_token: String,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyUsername)]
    #[case("   ", "pw", LoginValidationError::EmptyUsername)]
    #[case("user", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(username, password, Role::Customer)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  alice  ", "secret")]
    #[case("bob", "correct horse battery staple")]
    fn valid_credentials_trim_username(#[case] username: &str, #[case] password: &str) {
        let creds = LoginCredentials::try_from_parts(username, password, Role::Banker)
            .expect("valid inputs should succeed");
        assert_eq!(creds.username(), username.trim());
        assert_eq!(creds.password(), password);
    }

    #[rstest]
    fn credentials_serialise_as_login_body() {
        let creds = LoginCredentials::try_from_parts("alice", "pw", Role::Admin)
            .expect("valid inputs should succeed");
        assert_eq!(
            serde_json::to_value(&creds).expect("serialise credentials"),
            serde_json::json!({"username": "alice", "password": "pw", "role": "ADMIN"})
        );
    }
}
