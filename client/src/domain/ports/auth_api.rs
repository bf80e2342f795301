//! Driving port for login and registration.
//!
//! These calls go out without a bearer token and without the refresh
//! interceptor; a 401 here means bad credentials, not an expired session.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{LoginCredentials, Registration, TokenPair};

/// Port for the unauthenticated `/auth` endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// `POST /auth/login`.
    async fn login(&self, credentials: &LoginCredentials) -> Result<TokenPair, ApiError>;

    /// `POST /auth/register`.
    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;
}
