//! Driving port for banker endpoints.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{Customer, Transaction, TransactionId, UserId};

/// Port for `/banker` endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BankerApi: Send + Sync {
    /// `GET /banker/customers`.
    async fn fetch_customers(&self) -> Result<Vec<Customer>, ApiError>;

    /// `POST /banker/customers/{id}/activate`.
    async fn activate_customer(&self, id: UserId) -> Result<(), ApiError>;

    /// `POST /banker/customers/{id}/deactivate`.
    async fn deactivate_customer(&self, id: UserId) -> Result<(), ApiError>;

    /// `GET /banker/transactions/pending`.
    async fn fetch_pending_transactions(&self) -> Result<Vec<Transaction>, ApiError>;

    /// `POST /banker/transactions/{id}/approve`.
    async fn approve_transaction(&self, id: TransactionId) -> Result<(), ApiError>;

    /// `POST /banker/transactions/{id}/reject`.
    async fn reject_transaction(&self, id: TransactionId) -> Result<(), ApiError>;
}
