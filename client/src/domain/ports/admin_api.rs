//! Driving port for administrator endpoints.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{User, UserId};

/// Port for `/admin` endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// `GET /admin/users`.
    async fn fetch_users(&self) -> Result<Vec<User>, ApiError>;

    /// `DELETE /admin/users/{id}`.
    async fn delete_user(&self, id: UserId) -> Result<(), ApiError>;
}
