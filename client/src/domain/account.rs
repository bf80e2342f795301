//! Accounts and the requests that act on them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{AccountId, UserId};

/// Bank account as returned by `GET /accounts/{userId}`.
///
/// The balance is a snapshot of the backend's figure; the client never
/// recomputes it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    /// Backend identifier.
    pub id: AccountId,
    /// Customer-facing account number.
    pub account_number: String,
    /// Balance at fetch time.
    pub balance: Decimal,
    /// Owning user, when the backend includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_user_id: Option<UserId>,
}

/// Body of `POST /accounts`, opened by a banker for a customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAccount {
    /// Customer receiving the account.
    pub user_id: UserId,
    /// Twelve-digit account number.
    pub account_number: String,
    /// Opening balance.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// Body of `POST /accounts/transfer`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    /// Source account number, owned by the caller.
    pub from_account_number: String,
    /// Beneficiary account number.
    pub to_account_number: String,
    /// Amount to move.
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
}
