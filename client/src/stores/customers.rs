//! Customers store: the banker's customer list and approval queue.

use std::sync::Arc;

use tracing::{debug, warn};

use super::resource::Resource;
use crate::domain::ports::{ApiError, BankerApi};
use crate::domain::{Customer, DomainError, Transaction, TransactionId, UserId};

/// State for banker workflows.
pub struct CustomerStore {
    api: Arc<dyn BankerApi>,
    customers: Resource<Customer>,
    pending: Resource<Transaction>,
}

impl CustomerStore {
    /// Empty store backed by `api`.
    pub fn new(api: Arc<dyn BankerApi>) -> Self {
        Self {
            api,
            customers: Resource::default(),
            pending: Resource::default(),
        }
    }

    /// Customers and their fetch state.
    pub fn customers(&self) -> &Resource<Customer> {
        &self.customers
    }

    /// Transactions awaiting approval and their fetch state.
    pub fn pending_transactions(&self) -> &Resource<Transaction> {
        &self.pending
    }

    /// Load every customer, replacing the list.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn fetch_customers(&mut self) -> Result<(), DomainError> {
        self.customers.begin();
        let result = self.api.fetch_customers().await;
        self.apply_customers(result)
    }

    /// Load customers and the approval queue concurrently.
    ///
    /// Returns both outcomes, customers first; each is also recorded in the
    /// store state.
    pub async fn fetch_all(&mut self) -> (Result<(), DomainError>, Result<(), DomainError>) {
        self.customers.begin();
        self.pending.begin();
        let (customers, pending) = tokio::join!(
            self.api.fetch_customers(),
            self.api.fetch_pending_transactions()
        );
        (self.apply_customers(customers), self.apply_pending(pending))
    }

    fn apply_customers(&mut self, result: Result<Vec<Customer>, ApiError>) -> Result<(), DomainError> {
        match result {
            Ok(customers) => {
                debug!(count = customers.len(), "customers loaded");
                self.customers.replace(customers);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "fetching customers failed");
                let error = err.into_store_error("Failed to fetch customers");
                self.customers.fail(error.clone());
                Err(error)
            }
        }
    }

    /// Enable a customer; the listed entry is marked active once confirmed.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn activate(&mut self, id: UserId) -> Result<(), DomainError> {
        self.set_active(id, true).await
    }

    /// Disable a customer; the listed entry is marked inactive once confirmed.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn deactivate(&mut self, id: UserId) -> Result<(), DomainError> {
        self.set_active(id, false).await
    }

    async fn set_active(&mut self, id: UserId, active: bool) -> Result<(), DomainError> {
        let (result, fallback) = if active {
            (self.api.activate_customer(id).await, "Failed to activate customer")
        } else {
            (self.api.deactivate_customer(id).await, "Failed to deactivate customer")
        };
        match result {
            Ok(()) => {
                debug!(customer_id = %id, active, "customer status changed");
                if let Some(customer) = self
                    .customers
                    .items_mut()
                    .iter_mut()
                    .find(|customer| customer.id == id)
                {
                    customer.active = active;
                }
                Ok(())
            }
            Err(err) => {
                warn!(customer_id = %id, active, error = %err, "changing customer status failed");
                let error = err.into_store_error(fallback);
                self.customers.fail(error.clone());
                Err(error)
            }
        }
    }

    /// Load the approval queue, replacing it.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn fetch_pending_transactions(&mut self) -> Result<(), DomainError> {
        self.pending.begin();
        let result = self.api.fetch_pending_transactions().await;
        self.apply_pending(result)
    }

    fn apply_pending(&mut self, result: Result<Vec<Transaction>, ApiError>) -> Result<(), DomainError> {
        match result {
            Ok(transactions) => {
                debug!(count = transactions.len(), "pending transactions loaded");
                self.pending.replace(transactions);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "fetching pending transactions failed");
                let error = err.into_store_error("Failed to fetch pending transactions");
                self.pending.fail(error.clone());
                Err(error)
            }
        }
    }

    /// Approve a pending transaction; it leaves the queue once confirmed.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn approve(&mut self, id: TransactionId) -> Result<(), DomainError> {
        self.decide(id, true).await
    }

    /// Reject a pending transaction; it leaves the queue once confirmed.
    ///
    /// # Errors
    ///
    /// Returns the failure also recorded in the store state.
    pub async fn reject(&mut self, id: TransactionId) -> Result<(), DomainError> {
        self.decide(id, false).await
    }

    async fn decide(&mut self, id: TransactionId, approve: bool) -> Result<(), DomainError> {
        let (result, fallback) = if approve {
            (self.api.approve_transaction(id).await, "Failed to approve transaction")
        } else {
            (self.api.reject_transaction(id).await, "Failed to reject transaction")
        };
        match result {
            Ok(()) => {
                debug!(transaction_id = %id, approve, "pending transaction decided");
                self.pending.items_mut().retain(|transaction| transaction.id != id);
                Ok(())
            }
            Err(err) => {
                warn!(transaction_id = %id, approve, error = %err, "deciding transaction failed");
                let error = err.into_store_error(fallback);
                self.pending.fail(error.clone());
                Err(error)
            }
        }
    }

    /// Drop recorded failures.
    pub fn clear_error(&mut self) {
        self.customers.clear_error();
        self.pending.clear_error();
    }

    /// Return to the initial empty state.
    pub fn reset(&mut self) {
        self.customers = Resource::default();
        self.pending = Resource::default();
    }

    /// Enabled customers.
    pub fn active(&self) -> Vec<&Customer> {
        self.customers.items().iter().filter(|c| c.active).collect()
    }

    /// Disabled customers.
    pub fn inactive(&self) -> Vec<&Customer> {
        self.customers.items().iter().filter(|c| !c.active).collect()
    }

    /// Size of the approval queue.
    pub fn pending_count(&self) -> usize {
        self.pending.items().len()
    }
}
