//! Driving port for bill payment endpoints.

use async_trait::async_trait;

use super::ApiError;
use crate::domain::{
    BillPaymentRequest, PaymentId, RecurringPaymentRequest, ScheduledPayment, UserId,
};

/// Port for `/accounts/billpay` endpoints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BillPaymentApi: Send + Sync {
    /// `POST /accounts/billpay`; returns the backend's confirmation text.
    async fn pay_bill(&self, payment: &BillPaymentRequest) -> Result<Option<String>, ApiError>;

    /// `POST /accounts/billpay/schedule`; returns the confirmation text.
    async fn schedule_recurring(
        &self,
        payment: &RecurringPaymentRequest,
    ) -> Result<Option<String>, ApiError>;

    /// `GET /accounts/billpay/scheduled/{userId}`.
    async fn fetch_scheduled(&self, user_id: UserId) -> Result<Vec<ScheduledPayment>, ApiError>;

    /// `DELETE /accounts/billpay/{id}`.
    async fn cancel_scheduled(&self, id: PaymentId) -> Result<(), ApiError>;
}
