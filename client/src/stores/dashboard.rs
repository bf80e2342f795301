//! Role dashboards: aggregates filled by concurrent store fetches.
//!
//! Each dashboard owns independent stores and loads them with
//! `tokio::join!`. A failing fetch leaves its own store in the failed state
//! without affecting the others.

use std::sync::Arc;

use rust_decimal::Decimal;

use super::{AccountStore, BillPaymentStore, CustomerStore, TransactionStore, UserStore};
use crate::domain::ports::{AccountsApi, AdminApi, BankerApi, BillPaymentApi};
use crate::domain::{DomainError, UserId};

fn failures<const N: usize>(results: [Result<(), DomainError>; N]) -> Vec<DomainError> {
    results.into_iter().filter_map(Result::err).collect()
}

/// Accounts, recent activity, and scheduled payments of one customer.
pub struct CustomerDashboard {
    /// Owned accounts.
    pub accounts: AccountStore,
    /// Transaction history.
    pub transactions: TransactionStore,
    /// Scheduled bill payments.
    pub bill_payments: BillPaymentStore,
}

impl CustomerDashboard {
    /// Dashboard backed by the account and bill payment ports.
    pub fn new(accounts: Arc<dyn AccountsApi>, bill_payments: Arc<dyn BillPaymentApi>) -> Self {
        Self {
            accounts: AccountStore::new(Arc::clone(&accounts)),
            transactions: TransactionStore::new(accounts),
            bill_payments: BillPaymentStore::new(bill_payments),
        }
    }

    /// Fetch accounts, transactions, and scheduled payments concurrently.
    ///
    /// Returns the failures; each is also recorded in its store.
    pub async fn load(&mut self, user_id: UserId) -> Vec<DomainError> {
        let (accounts, transactions, scheduled) = tokio::join!(
            self.accounts.fetch_accounts(user_id),
            self.transactions.fetch_transactions(user_id),
            self.bill_payments.fetch_scheduled(user_id),
        );
        failures([accounts, transactions, scheduled])
    }

    /// Sum of the customer's balances.
    pub fn total_balance(&self) -> Decimal {
        self.accounts.total_balance()
    }
}

/// Customer listing and approval queue for bankers.
pub struct BankerDashboard {
    /// Customers and pending transactions.
    pub customers: CustomerStore,
}

impl BankerDashboard {
    /// Dashboard backed by the banker port.
    pub fn new(api: Arc<dyn BankerApi>) -> Self {
        Self {
            customers: CustomerStore::new(api),
        }
    }

    /// Fetch customers and pending transactions concurrently.
    ///
    /// Returns the failures; each is also recorded in the store.
    pub async fn load(&mut self) -> Vec<DomainError> {
        let (customers, pending) = self.customers.fetch_all().await;
        failures([customers, pending])
    }
}

/// User listing for administrators.
pub struct AdminDashboard {
    /// Every user.
    pub users: UserStore,
}

impl AdminDashboard {
    /// Dashboard backed by the admin port.
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Self {
            users: UserStore::new(api),
        }
    }

    /// Fetch every user.
    ///
    /// Returns the failure, if any; it is also recorded in the store.
    pub async fn load(&mut self) -> Vec<DomainError> {
        failures([self.users.fetch_users().await])
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ports::{
        ApiError, MockAccountsApi, MockAdminApi, MockBankerApi, MockBillPaymentApi,
    };
    use crate::domain::{Account, AccountId, Customer, ErrorCode, Role, User};
    use rstest::rstest;

    fn accounts_api() -> MockAccountsApi {
        let mut api = MockAccountsApi::new();
        api.expect_fetch_accounts().times(1).returning(|_| {
            Ok(vec![Account {
                id: AccountId::new(1),
                account_number: "100012345678".to_owned(),
                balance: Decimal::new(50000, 2),
                owner_user_id: None,
            }])
        });
        api.expect_fetch_transactions()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        api
    }

    #[rstest]
    #[tokio::test]
    async fn customer_dashboard_loads_every_store() {
        let mut bills = MockBillPaymentApi::new();
        bills
            .expect_fetch_scheduled()
            .times(1)
            .returning(|_| Ok(Vec::new()));
        let mut dashboard = CustomerDashboard::new(Arc::new(accounts_api()), Arc::new(bills));

        let failed = dashboard.load(UserId::new(1)).await;

        assert!(failed.is_empty());
        assert_eq!(dashboard.total_balance(), Decimal::new(50000, 2));
        assert!(!dashboard.accounts.accounts().is_loading());
        assert!(!dashboard.bill_payments.scheduled().is_loading());
    }

    #[rstest]
    #[tokio::test]
    async fn one_failing_fetch_leaves_the_others_loaded() {
        let mut bills = MockBillPaymentApi::new();
        bills
            .expect_fetch_scheduled()
            .returning(|_| Err(ApiError::status(500, None)));
        let mut dashboard = CustomerDashboard::new(Arc::new(accounts_api()), Arc::new(bills));

        let failed = dashboard.load(UserId::new(1)).await;

        assert_eq!(failed.len(), 1);
        assert_eq!(
            failed.first().map(DomainError::message),
            Some("Failed to fetch scheduled payments")
        );
        assert_eq!(dashboard.accounts.accounts().items().len(), 1);
        assert!(dashboard.accounts.accounts().error().is_none());
    }

    #[rstest]
    #[tokio::test]
    async fn banker_dashboard_loads_customers_and_queue() {
        let mut api = MockBankerApi::new();
        api.expect_fetch_customers().times(1).returning(|| {
            Ok(vec![Customer {
                id: UserId::new(4),
                username: "carol".to_owned(),
                active: false,
            }])
        });
        api.expect_fetch_pending_transactions()
            .times(1)
            .returning(|| Err(ApiError::status(403, None)));
        let mut dashboard = BankerDashboard::new(Arc::new(api));

        let failed = dashboard.load().await;

        assert_eq!(failed.len(), 1);
        assert_eq!(failed.first().map(DomainError::code), Some(ErrorCode::Forbidden));
        assert_eq!(dashboard.customers.inactive().len(), 1);
        assert_eq!(dashboard.customers.pending_count(), 0);
    }

    #[rstest]
    #[tokio::test]
    async fn admin_dashboard_counts_roles() {
        let mut api = MockAdminApi::new();
        api.expect_fetch_users().times(1).returning(|| {
            Ok(vec![User {
                id: UserId::new(1),
                username: "root".to_owned(),
                role: Role::Admin,
                active: true,
            }])
        });
        let mut dashboard = AdminDashboard::new(Arc::new(api));

        assert!(dashboard.load().await.is_empty());
        assert_eq!(dashboard.users.count_by_role().get(&Role::Admin), Some(&1));
    }
}
