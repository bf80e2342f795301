//! `/auth` endpoints.

use async_trait::async_trait;

use super::{BankingApi, decode, json_body};
use crate::domain::ports::{ApiError, ApiRequest, ApiTransport, AuthApi};
use crate::domain::{LoginCredentials, Registration, TokenPair};

#[async_trait]
impl<T: ApiTransport> AuthApi for BankingApi<T> {
    async fn login(&self, credentials: &LoginCredentials) -> Result<TokenPair, ApiError> {
        let request = ApiRequest::post("/auth/login").with_body(json_body(credentials)?);
        let response = self.client.send_unauthenticated(&request).await?;
        decode(&response)
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let request = ApiRequest::post("/auth/register").with_body(json_body(registration)?);
        self.client.send_unauthenticated(&request).await?;
        Ok(())
    }
}
