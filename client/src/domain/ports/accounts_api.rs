//! Driving port for account and transaction endpoints.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{Account, NewAccount, Transaction, TransactionFilters, TransferRequest, UserId};

/// Port for `/accounts` endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AccountsApi: Send + Sync {
    /// `GET /accounts/{userId}`.
    async fn fetch_accounts(&self, user_id: UserId) -> Result<Vec<Account>, ApiError>;

    /// `POST /accounts`; returns the created account.
    async fn create_account(&self, account: &NewAccount) -> Result<Account, ApiError>;

    /// `POST /accounts/transfer`; returns the backend's confirmation text.
    async fn transfer(&self, transfer: &TransferRequest) -> Result<Option<String>, ApiError>;

    /// `GET /accounts/transactions/{userId}`.
    async fn fetch_transactions(&self, user_id: UserId) -> Result<Vec<Transaction>, ApiError>;

    /// `GET /accounts/transactions` with filter query parameters.
    async fn fetch_transactions_filtered(
        &self,
        filters: &TransactionFilters,
    ) -> Result<Vec<Transaction>, ApiError>;
}
