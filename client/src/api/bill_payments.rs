//! `/accounts/billpay` endpoints.

use async_trait::async_trait;

use super::{BankingApi, decode_list, json_body};
use crate::domain::ports::{ApiError, ApiRequest, ApiTransport, BillPaymentApi};
use crate::domain::{
    BillPaymentRequest, PaymentId, RecurringPaymentRequest, ScheduledPayment, UserId,
};

#[async_trait]
impl<T: ApiTransport> BillPaymentApi for BankingApi<T> {
    async fn pay_bill(&self, payment: &BillPaymentRequest) -> Result<Option<String>, ApiError> {
        let request = ApiRequest::post("/accounts/billpay").with_body(json_body(payment)?);
        let response = self.client.execute(&request).await?;
        Ok(response.message())
    }

    async fn schedule_recurring(
        &self,
        payment: &RecurringPaymentRequest,
    ) -> Result<Option<String>, ApiError> {
        let request = ApiRequest::post("/accounts/billpay/schedule").with_body(json_body(payment)?);
        let response = self.client.execute(&request).await?;
        Ok(response.message())
    }

    async fn fetch_scheduled(&self, user_id: UserId) -> Result<Vec<ScheduledPayment>, ApiError> {
        let response = self
            .client
            .execute(&ApiRequest::get(format!("/accounts/billpay/scheduled/{user_id}")))
            .await?;
        decode_list(&response)
    }

    async fn cancel_scheduled(&self, id: PaymentId) -> Result<(), ApiError> {
        self.client
            .execute(&ApiRequest::delete(format!("/accounts/billpay/{id}")))
            .await?;
        Ok(())
    }
}
