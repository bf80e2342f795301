//! `/accounts` endpoints: balances, transfers, and history.

use async_trait::async_trait;

use super::{BankingApi, decode, decode_list, json_body};
use crate::domain::ports::{AccountsApi, ApiError, ApiRequest, ApiTransport};
use crate::domain::{Account, NewAccount, Transaction, TransactionFilters, TransferRequest, UserId};

#[async_trait]
impl<T: ApiTransport> AccountsApi for BankingApi<T> {
    async fn fetch_accounts(&self, user_id: UserId) -> Result<Vec<Account>, ApiError> {
        let response = self
            .client
            .execute(&ApiRequest::get(format!("/accounts/{user_id}")))
            .await?;
        decode_list(&response)
    }

    async fn create_account(&self, account: &NewAccount) -> Result<Account, ApiError> {
        let request = ApiRequest::post("/accounts").with_body(json_body(account)?);
        let response = self.client.execute(&request).await?;
        decode(&response)
    }

    async fn transfer(&self, transfer: &TransferRequest) -> Result<Option<String>, ApiError> {
        let request = ApiRequest::post("/accounts/transfer").with_body(json_body(transfer)?);
        let response = self.client.execute(&request).await?;
        Ok(response.message())
    }

    async fn fetch_transactions(&self, user_id: UserId) -> Result<Vec<Transaction>, ApiError> {
        let response = self
            .client
            .execute(&ApiRequest::get(format!("/accounts/transactions/{user_id}")))
            .await?;
        decode_list(&response)
    }

    async fn fetch_transactions_filtered(
        &self,
        filters: &TransactionFilters,
    ) -> Result<Vec<Transaction>, ApiError> {
        let request = ApiRequest::get("/accounts/transactions").with_query(filters.to_query());
        let response = self.client.execute(&request).await?;
        decode_list(&response)
    }
}
