//! Bill payments store: one-off payments and recurring schedules.

use std::sync::Arc;

use tracing::{debug, warn};

use super::resource::{Resource, Submission};
use crate::domain::ports::{ApiError, BillPaymentApi};
use crate::domain::{
    BillPaymentRequest, DomainError, PaymentId, RecurringPaymentRequest, ScheduledPayment, UserId,
};

/// Confirmation shown when the backend accepts a payment without a message.
pub const PAYMENT_PROCESSED: &str = "Payment processed successfully!";
/// Confirmation shown when the backend accepts a schedule without a message.
pub const PAYMENT_SCHEDULED: &str = "Recurring payment scheduled successfully!";

/// State for bill payments and scheduled payments.
pub struct BillPaymentStore {
    api: Arc<dyn BillPaymentApi>,
    scheduled: Resource<ScheduledPayment>,
    payment: Submission,
}

impl BillPaymentStore {
    /// Empty store backed by `api`.
    pub fn new(api: Arc<dyn BillPaymentApi>) -> Self {
        Self {
            api,
            scheduled: Resource::default(),
            payment: Submission::default(),
        }
    }

    /// Scheduled payments and their fetch state.
    pub fn scheduled(&self) -> &Resource<ScheduledPayment> {
        &self.scheduled
    }

    /// Outcome of the last payment or schedule submission.
    pub fn payment_status(&self) -> &Submission {
        &self.payment
    }

    /// Pay a bill once.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn pay_bill(&mut self, payment: &BillPaymentRequest) -> Result<String, DomainError> {
        self.scheduled.begin();
        self.payment = Submission::Idle;
        let result = self.api.pay_bill(payment).await;
        self.submitted(result, PAYMENT_PROCESSED, "Bill payment failed")
    }

    /// Schedule a recurring payment.
    ///
    /// The schedule list is not refetched; call
    /// [`fetch_scheduled`](Self::fetch_scheduled) to show the new entry.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn schedule_recurring(
        &mut self,
        payment: &RecurringPaymentRequest,
    ) -> Result<String, DomainError> {
        self.scheduled.begin();
        self.payment = Submission::Idle;
        let result = self.api.schedule_recurring(payment).await;
        self.submitted(result, PAYMENT_SCHEDULED, "Failed to schedule payment")
    }

    fn submitted(
        &mut self,
        result: Result<Option<String>, ApiError>,
        confirmation: &str,
        fallback: &str,
    ) -> Result<String, DomainError> {
        match result {
            Ok(message) => {
                let message = message.unwrap_or_else(|| confirmation.to_owned());
                debug!("payment accepted");
                self.scheduled.settle();
                self.payment = Submission::Succeeded {
                    message: message.clone(),
                };
                Ok(message)
            }
            Err(err) => {
                warn!(error = %err, "payment submission failed");
                let error = err.into_store_error(fallback);
                self.scheduled.fail(error.clone());
                self.payment = Submission::Failed(error.clone());
                Err(error)
            }
        }
    }

    /// Load the scheduled payments of `user_id`, replacing the list.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn fetch_scheduled(&mut self, user_id: UserId) -> Result<(), DomainError> {
        self.scheduled.begin();
        match self.api.fetch_scheduled(user_id).await {
            Ok(payments) => {
                debug!(%user_id, count = payments.len(), "scheduled payments loaded");
                self.scheduled.replace(payments);
                Ok(())
            }
            Err(err) => {
                warn!(%user_id, error = %err, "fetching scheduled payments failed");
                let error = err.into_store_error("Failed to fetch scheduled payments");
                self.scheduled.fail(error.clone());
                Err(error)
            }
        }
    }

    /// Cancel a scheduled payment; the entry is removed once confirmed.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn cancel_scheduled(&mut self, id: PaymentId) -> Result<(), DomainError> {
        self.scheduled.begin();
        match self.api.cancel_scheduled(id).await {
            Ok(()) => {
                debug!(payment_id = %id, "scheduled payment cancelled");
                self.scheduled.settle();
                self.scheduled.items_mut().retain(|payment| payment.id != id);
                Ok(())
            }
            Err(err) => {
                warn!(payment_id = %id, error = %err, "cancelling scheduled payment failed");
                let error = err.into_store_error("Failed to cancel payment");
                self.scheduled.fail(error.clone());
                Err(error)
            }
        }
    }

    /// Drop a recorded failure.
    pub fn clear_error(&mut self) {
        self.scheduled.clear_error();
    }

    /// Forget the last submission outcome.
    pub fn clear_payment_status(&mut self) {
        self.payment = Submission::Idle;
    }

    /// Return to the initial empty state.
    pub fn reset(&mut self) {
        self.scheduled = Resource::default();
        self.payment = Submission::Idle;
    }

    /// Scheduled payments that are neither cancelled nor failed.
    pub fn active_scheduled(&self) -> Vec<&ScheduledPayment> {
        self.scheduled
            .items()
            .iter()
            .filter(|payment| payment.status.is_active())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::MockBillPaymentApi;
    use crate::domain::{Frequency, PaymentStatus};
    use mockall::predicate::eq;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn scheduled(id: i64, status: PaymentStatus) -> ScheduledPayment {
        ScheduledPayment {
            id: PaymentId::new(id),
            biller_name: format!("Biller {id}"),
            amount: Decimal::new(1200, 0),
            frequency: Frequency::Monthly,
            next_payment_date: None,
            status,
        }
    }

    fn bill() -> BillPaymentRequest {
        BillPaymentRequest {
            account_number: "100012345678".to_owned(),
            biller_name: "City Power".to_owned(),
            amount: Decimal::new(450, 0),
        }
    }

    async fn loaded(mut api: MockBillPaymentApi) -> BillPaymentStore {
        api.expect_fetch_scheduled().returning(|_| {
            Ok(vec![
                scheduled(1, PaymentStatus::Pending),
                scheduled(2, PaymentStatus::Cancelled),
                scheduled(3, PaymentStatus::Completed),
                scheduled(4, PaymentStatus::Failed),
            ])
        });
        let mut store = BillPaymentStore::new(Arc::new(api));
        store.fetch_scheduled(UserId::new(1)).await.expect("fetch");
        store
    }

    #[rstest]
    #[tokio::test]
    async fn active_schedule_excludes_cancelled_and_failed() {
        let store = loaded(MockBillPaymentApi::new()).await;
        let ids: Vec<i64> = store.active_scheduled().iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[rstest]
    #[tokio::test]
    async fn cancelling_removes_the_entry() {
        let mut api = MockBillPaymentApi::new();
        api.expect_cancel_scheduled()
            .with(eq(PaymentId::new(3)))
            .times(1)
            .returning(|_| Ok(()));
        let mut store = loaded(api).await;

        store.cancel_scheduled(PaymentId::new(3)).await.expect("cancel");

        assert_eq!(store.scheduled().items().len(), 3);
        assert!(store.scheduled().items().iter().all(|p| p.id != PaymentId::new(3)));
    }

    #[rstest]
    #[tokio::test]
    async fn failed_cancel_keeps_the_entry() {
        let mut api = MockBillPaymentApi::new();
        api.expect_cancel_scheduled()
            .returning(|_| Err(ApiError::status(404, None)));
        let mut store = loaded(api).await;

        let err = store
            .cancel_scheduled(PaymentId::new(1))
            .await
            .expect_err("cancel fails");

        assert_eq!(err.message(), "Failed to cancel payment");
        assert_eq!(store.scheduled().items().len(), 4);
    }

    #[rstest]
    #[case(None, PAYMENT_PROCESSED)]
    #[case(Some("Paid City Power"), "Paid City Power")]
    #[tokio::test]
    async fn paying_records_confirmation(
        #[case] reply: Option<&'static str>,
        #[case] expected: &str,
    ) {
        let mut api = MockBillPaymentApi::new();
        api.expect_pay_bill()
            .with(eq(bill()))
            .times(1)
            .returning(move |_| Ok(reply.map(str::to_owned)));
        let mut store = BillPaymentStore::new(Arc::new(api));

        let message = store.pay_bill(&bill()).await.expect("payment succeeds");

        assert_eq!(message, expected);
        assert!(store.payment_status().is_success());
        store.clear_payment_status();
        assert!(!store.payment_status().is_success());
    }

    #[rstest]
    #[tokio::test]
    async fn failed_schedule_uses_backend_text() {
        let mut api = MockBillPaymentApi::new();
        api.expect_schedule_recurring()
            .returning(|_| Err(ApiError::status(400, Some("Biller not supported".to_owned()))));
        let mut store = BillPaymentStore::new(Arc::new(api));
        let request = RecurringPaymentRequest {
            payment: bill(),
            frequency: Frequency::Weekly,
        };

        let err = store
            .schedule_recurring(&request)
            .await
            .expect_err("schedule fails");

        assert_eq!(err.message(), "Biller not supported");
        assert_eq!(store.payment_status(), &Submission::Failed(err));
    }
}
