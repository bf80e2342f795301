//! Bill payments, one-off and recurring.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::PaymentId;
use super::timestamp::Timestamp;

/// How often a recurring payment runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    /// Every day.
    Daily,
    /// Every week.
    Weekly,
    /// Every month.
    Monthly,
}

impl Frequency {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a frequency name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown frequency `{0}`; expected DAILY, WEEKLY, or MONTHLY")]
pub struct FrequencyParseError(String);

impl FromStr for Frequency {
    type Err = FrequencyParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [Self::Daily, Self::Weekly, Self::Monthly]
            .into_iter()
            .find(|frequency| frequency.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| FrequencyParseError(value.to_owned()))
    }
}

/// State of a scheduled payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Waiting for the next run.
    Pending,
    /// Ran successfully.
    Completed,
    /// Last run failed.
    Failed,
    /// Cancelled by the customer.
    Cancelled,
}

impl PaymentStatus {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Whether the payment will still run.
    pub const fn is_active(self) -> bool {
        !matches!(self, Self::Cancelled | Self::Failed)
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recurring payment as listed by `GET /accounts/billpay/scheduled/{userId}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledPayment {
    /// Backend identifier.
    pub id: PaymentId,
    /// Payee.
    pub biller_name: String,
    /// Amount per run.
    pub amount: Decimal,
    /// Run cadence.
    pub frequency: Frequency,
    /// Next run date.
    #[serde(default)]
    pub next_payment_date: Option<Timestamp>,
    /// Current state.
    pub status: PaymentStatus,
}

/// Body of `POST /accounts/billpay`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillPaymentRequest {
    /// Paying account number.
    pub account_number: String,
    /// Payee.
    pub biller_name: String,
    /// Amount to pay.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}

/// Body of `POST /accounts/billpay/schedule`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringPaymentRequest {
    /// One-off payment fields shared with the recurring schedule.
    #[serde(flatten)]
    pub payment: BillPaymentRequest,
    /// Run cadence.
    pub frequency: Frequency,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(PaymentStatus::Pending, true)]
    #[case(PaymentStatus::Completed, true)]
    #[case(PaymentStatus::Failed, false)]
    #[case(PaymentStatus::Cancelled, false)]
    fn cancelled_and_failed_payments_are_inactive(
        #[case] status: PaymentStatus,
        #[case] expected: bool,
    ) {
        assert_eq!(status.is_active(), expected);
    }

    #[rstest]
    fn recurring_request_flattens_payment_fields() {
        let request = RecurringPaymentRequest {
            payment: BillPaymentRequest {
                account_number: "100012345678".to_owned(),
                biller_name: "City Power".to_owned(),
                amount: Decimal::new(1250, 1),
            },
            frequency: Frequency::Monthly,
        };
        assert_eq!(
            serde_json::to_value(&request).expect("serialise request"),
            serde_json::json!({
                "accountNumber": "100012345678",
                "billerName": "City Power",
                "amount": 125.0,
                "frequency": "MONTHLY"
            })
        );
    }

    #[rstest]
    fn frequency_parses_case_insensitively() {
        assert_eq!("weekly".parse::<Frequency>(), Ok(Frequency::Weekly));
        assert!("yearly".parse::<Frequency>().is_err());
    }
}
