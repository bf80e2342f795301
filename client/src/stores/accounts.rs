//! Accounts store: the signed-in user's accounts and fund transfers.

use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use super::resource::{Resource, Submission};
use crate::domain::ports::AccountsApi;
use crate::domain::{Account, AccountId, DomainError, NewAccount, TransferRequest, UserId, is_high_value};

const FETCH_FAILED: &str = "Failed to fetch accounts";
const CREATE_FAILED: &str = "Failed to create account";
const TRANSFER_FAILED: &str = "Transfer failed";
/// Confirmation shown when the backend accepts a transfer without a message.
pub const TRANSFER_INITIATED: &str = "Transfer initiated successfully!";

/// State for account listings and transfers.
pub struct AccountStore {
    api: Arc<dyn AccountsApi>,
    accounts: Resource<Account>,
    selected: Option<AccountId>,
    transfer: Submission,
}

impl AccountStore {
    /// Empty store backed by `api`.
    pub fn new(api: Arc<dyn AccountsApi>) -> Self {
        Self {
            api,
            accounts: Resource::default(),
            selected: None,
            transfer: Submission::default(),
        }
    }

    /// Accounts and their fetch state.
    pub fn accounts(&self) -> &Resource<Account> {
        &self.accounts
    }

    /// Outcome of the last transfer.
    pub fn transfer_status(&self) -> &Submission {
        &self.transfer
    }

    /// Load the accounts owned by `user_id`, replacing the list.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn fetch_accounts(&mut self, user_id: UserId) -> Result<(), DomainError> {
        self.accounts.begin();
        match self.api.fetch_accounts(user_id).await {
            Ok(accounts) => {
                debug!(%user_id, count = accounts.len(), "accounts loaded");
                self.accounts.replace(accounts);
                Ok(())
            }
            Err(err) => {
                warn!(%user_id, error = %err, "fetching accounts failed");
                let error = err.into_store_error(FETCH_FAILED);
                self.accounts.fail(error.clone());
                Err(error)
            }
        }
    }

    /// Open an account; the created account is appended once confirmed.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn create_account(&mut self, account: &NewAccount) -> Result<Account, DomainError> {
        self.accounts.begin();
        match self.api.create_account(account).await {
            Ok(created) => {
                debug!(account_id = %created.id, "account created");
                self.accounts.settle();
                self.accounts.items_mut().push(created.clone());
                Ok(created)
            }
            Err(err) => {
                warn!(error = %err, "creating account failed");
                let error = err.into_store_error(CREATE_FAILED);
                self.accounts.fail(error.clone());
                Err(error)
            }
        }
    }

    /// Submit a transfer and record its outcome.
    ///
    /// Balances are not adjusted locally; refetch accounts to see the
    /// backend's figures. Amounts above the high-value threshold are held
    /// for banker approval by the backend.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn transfer(&mut self, request: &TransferRequest) -> Result<String, DomainError> {
        self.accounts.begin();
        self.transfer = Submission::Idle;
        let high_value = is_high_value(request.amount);
        match self.api.transfer(request).await {
            Ok(message) => {
                let message = message.unwrap_or_else(|| TRANSFER_INITIATED.to_owned());
                debug!(high_value, "transfer accepted");
                self.accounts.settle();
                self.transfer = Submission::Succeeded {
                    message: message.clone(),
                };
                Ok(message)
            }
            Err(err) => {
                warn!(high_value, error = %err, "transfer failed");
                let error = err.into_store_error(TRANSFER_FAILED);
                self.accounts.fail(error.clone());
                self.transfer = Submission::Failed(error.clone());
                Err(error)
            }
        }
    }

    /// Select the account with `id`; clears the selection when it is not listed.
    pub fn select_account(&mut self, id: AccountId) {
        self.selected = self.account_by_id(id).map(|account| account.id);
    }

    /// Currently selected account.
    pub fn selected(&self) -> Option<&Account> {
        self.selected.and_then(|id| self.account_by_id(id))
    }

    /// Drop a recorded failure.
    pub fn clear_error(&mut self) {
        self.accounts.clear_error();
    }

    /// Forget the last transfer outcome.
    pub fn clear_transfer_status(&mut self) {
        self.transfer = Submission::Idle;
    }

    /// Return to the initial empty state.
    pub fn reset(&mut self) {
        self.accounts = Resource::default();
        self.selected = None;
        self.transfer = Submission::Idle;
    }

    /// Sum of all listed balances.
    pub fn total_balance(&self) -> Decimal {
        self.accounts.items().iter().map(|account| account.balance).sum()
    }

    /// Listed account with `id`.
    pub fn account_by_id(&self, id: AccountId) -> Option<&Account> {
        self.accounts.items().iter().find(|account| account.id == id)
    }

    /// Listed account with `account_number`.
    pub fn account_by_number(&self, account_number: &str) -> Option<&Account> {
        self.accounts
            .items()
            .iter()
            .find(|account| account.account_number == account_number)
    }
}
