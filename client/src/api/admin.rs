//! `/admin` endpoints.

use async_trait::async_trait;

use super::{BankingApi, decode_list};
use crate::domain::ports::{AdminApi, ApiError, ApiRequest, ApiTransport};
use crate::domain::{User, UserId};

#[async_trait]
impl<T: ApiTransport> AdminApi for BankingApi<T> {
    async fn fetch_users(&self) -> Result<Vec<User>, ApiError> {
        let response = self.client.execute(&ApiRequest::get("/admin/users")).await?;
        decode_list(&response)
    }

    async fn delete_user(&self, id: UserId) -> Result<(), ApiError> {
        self.client
            .execute(&ApiRequest::delete(format!("/admin/users/{id}")))
            .await?;
        Ok(())
    }
}
