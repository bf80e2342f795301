//! Transactions store: history with local type and status filters.

use std::sync::Arc;

use tracing::{debug, warn};

use super::resource::Resource;
use crate::domain::ports::{AccountsApi, ApiError};
use crate::domain::{DomainError, Transaction, TransactionFilters, UserId};

const FETCH_FAILED: &str = "Failed to fetch transactions";
/// Number of entries shown as recent activity.
pub const RECENT_LIMIT: usize = 5;

/// State for transaction history.
pub struct TransactionStore {
    api: Arc<dyn AccountsApi>,
    transactions: Resource<Transaction>,
    filters: TransactionFilters,
}

impl TransactionStore {
    /// Empty store backed by `api`.
    pub fn new(api: Arc<dyn AccountsApi>) -> Self {
        Self {
            api,
            transactions: Resource::default(),
            filters: TransactionFilters::default(),
        }
    }

    /// Transactions and their fetch state.
    pub fn transactions(&self) -> &Resource<Transaction> {
        &self.transactions
    }

    /// Active filters.
    pub fn filters(&self) -> &TransactionFilters {
        &self.filters
    }

    /// Load the history of `user_id`, replacing the list.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn fetch_transactions(&mut self, user_id: UserId) -> Result<(), DomainError> {
        self.transactions.begin();
        let result = self.api.fetch_transactions(user_id).await;
        self.apply(result)
    }

    /// Load the history matching `filters` on the backend, replacing the list.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn fetch_with_filters(&mut self, filters: &TransactionFilters) -> Result<(), DomainError> {
        self.transactions.begin();
        let result = self.api.fetch_transactions_filtered(filters).await;
        self.apply(result)
    }

    fn apply(&mut self, result: Result<Vec<Transaction>, ApiError>) -> Result<(), DomainError> {
        match result {
            Ok(transactions) => {
                debug!(count = transactions.len(), "transactions loaded");
                self.transactions.replace(transactions);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "fetching transactions failed");
                let error = err.into_store_error(FETCH_FAILED);
                self.transactions.fail(error.clone());
                Err(error)
            }
        }
    }

    /// Overlay the fields set in `patch` onto the active filters.
    pub fn set_filters(&mut self, patch: TransactionFilters) {
        self.filters.merge(patch);
    }

    /// Remove every filter.
    pub fn clear_filters(&mut self) {
        self.filters = TransactionFilters::default();
    }

    /// Drop a recorded failure.
    pub fn clear_error(&mut self) {
        self.transactions.clear_error();
    }

    /// Return to the initial empty state.
    pub fn reset(&mut self) {
        self.transactions = Resource::default();
        self.filters = TransactionFilters::default();
    }

    /// Listed transactions passing the type and status filters.
    pub fn filtered(&self) -> Vec<&Transaction> {
        self.transactions
            .items()
            .iter()
            .filter(|transaction| self.filters.matches(transaction))
            .collect()
    }

    /// The newest transactions, most recent first.
    ///
    /// Transactions without a readable timestamp sort last.
    pub fn recent(&self) -> Vec<&Transaction> {
        let mut sorted: Vec<&Transaction> = self.transactions.items().iter().collect();
        sorted.sort_by(|a, b| {
            let newer = b.timestamp.as_ref().and_then(|ts| ts.parse());
            let older = a.timestamp.as_ref().and_then(|ts| ts.parse());
            newer.cmp(&older)
        });
        sorted.truncate(RECENT_LIMIT);
        sorted
    }
}
