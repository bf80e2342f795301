//! Transactions and history filters.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::TransactionId;
use super::timestamp::Timestamp;

/// Kind of money movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    /// Account-to-account transfer.
    Transfer,
    /// Payment to an external biller.
    BillPayment,
}

impl TransactionType {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Transfer => "TRANSFER",
            Self::BillPayment => "BILL_PAYMENT",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = TransactionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [Self::Transfer, Self::BillPayment]
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| TransactionParseError::Type(value.to_owned()))
    }
}

/// Lifecycle state; transitions happen on the backend only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Awaiting banker approval.
    Pending,
    /// Approved by a banker.
    Approved,
    /// Rejected by a banker.
    Rejected,
    /// Settled.
    Completed,
}

impl TransactionStatus {
    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Completed => "COMPLETED",
        }
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionStatus {
    type Err = TransactionParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        [Self::Pending, Self::Approved, Self::Rejected, Self::Completed]
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| TransactionParseError::Status(value.to_owned()))
    }
}

/// Error returned when a transaction type or status name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransactionParseError {
    /// Unknown type name.
    #[error("unknown transaction type `{0}`; expected TRANSFER or BILL_PAYMENT")]
    Type(String),
    /// Unknown status name.
    #[error("unknown transaction status `{0}`; expected PENDING, APPROVED, REJECTED, or COMPLETED")]
    Status(String),
}

/// Transaction record as listed in history and banker approval queues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Backend identifier.
    pub id: TransactionId,
    /// Kind of movement.
    #[serde(rename = "type")]
    pub kind: TransactionType,
    /// Source account number.
    #[serde(default)]
    pub from_account: Option<String>,
    /// Destination account number.
    #[serde(default)]
    pub to_account: Option<String>,
    /// Amount moved.
    pub amount: Decimal,
    /// Current status.
    pub status: TransactionStatus,
    /// When the backend recorded the transaction.
    #[serde(default)]
    pub timestamp: Option<Timestamp>,
    /// Username of the sender, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from_user: Option<String>,
    /// Username of the recipient, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_user: Option<String>,
    /// Free-text description, when provided.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Filters for transaction history.
///
/// Type and status are applied locally by the transaction store; every set
/// field is also sent as a query parameter by the filtered fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilters {
    /// Only this kind of movement.
    pub kind: Option<TransactionType>,
    /// Only this status.
    pub status: Option<TransactionStatus>,
    /// Earliest date, inclusive.
    pub start_date: Option<NaiveDate>,
    /// Latest date, inclusive.
    pub end_date: Option<NaiveDate>,
}

impl TransactionFilters {
    /// Overlay the fields set in `patch` onto these filters.
    pub fn merge(&mut self, patch: Self) {
        let Self {
            kind,
            status,
            start_date,
            end_date,
        } = patch;
        self.kind = kind.or(self.kind);
        self.status = status.or(self.status);
        self.start_date = start_date.or(self.start_date);
        self.end_date = end_date.or(self.end_date);
    }

    /// Whether a transaction passes the type and status filters.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.kind.is_none_or(|kind| transaction.kind == kind)
            && self.status.is_none_or(|status| transaction.status == status)
    }

    /// Query parameters for `GET /accounts/transactions`.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        if let Some(kind) = self.kind {
            query.push(("type".to_owned(), kind.as_str().to_owned()));
        }
        if let Some(status) = self.status {
            query.push(("status".to_owned(), status.as_str().to_owned()));
        }
        if let Some(start) = self.start_date {
            query.push(("startDate".to_owned(), start.format("%Y-%m-%d").to_string()));
        }
        if let Some(end) = self.end_date {
            query.push(("endDate".to_owned(), end.format("%Y-%m-%d").to_string()));
        }
        query
    }
}
