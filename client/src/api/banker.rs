//! `/banker` endpoints.

use async_trait::async_trait;

use super::{BankingApi, decode_list};
use crate::domain::ports::{ApiError, ApiRequest, ApiTransport, BankerApi};
use crate::domain::{Customer, Transaction, TransactionId, UserId};

#[async_trait]
impl<T: ApiTransport> BankerApi for BankingApi<T> {
    async fn fetch_customers(&self) -> Result<Vec<Customer>, ApiError> {
        let response = self
            .client
            .execute(&ApiRequest::get("/banker/customers"))
            .await?;
        decode_list(&response)
    }

    async fn activate_customer(&self, id: UserId) -> Result<(), ApiError> {
        self.client
            .execute(&ApiRequest::post(format!("/banker/customers/{id}/activate")))
            .await?;
        Ok(())
    }

    async fn deactivate_customer(&self, id: UserId) -> Result<(), ApiError> {
        self.client
            .execute(&ApiRequest::post(format!("/banker/customers/{id}/deactivate")))
            .await?;
        Ok(())
    }

    async fn fetch_pending_transactions(&self) -> Result<Vec<Transaction>, ApiError> {
        let response = self
            .client
            .execute(&ApiRequest::get("/banker/transactions/pending"))
            .await?;
        decode_list(&response)
    }

    async fn approve_transaction(&self, id: TransactionId) -> Result<(), ApiError> {
        self.client
            .execute(&ApiRequest::post(format!("/banker/transactions/{id}/approve")))
            .await?;
        Ok(())
    }

    async fn reject_transaction(&self, id: TransactionId) -> Result<(), ApiError> {
        self.client
            .execute(&ApiRequest::post(format!("/banker/transactions/{id}/reject")))
            .await?;
        Ok(())
    }
}
