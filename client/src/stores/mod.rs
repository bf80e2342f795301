//! Feature stores holding per-domain client state.
//!
//! Every store owns its state exclusively and is driven through `&mut self`,
//! so each one has at most a single operation in flight. Stores talk to the
//! backend only through the API ports and never share mutable state; the
//! session handle passed to [`AuthStore`] is the single exception.

pub mod accounts;
pub mod auth;
pub mod bill_payments;
pub mod customers;
pub mod dashboard;
pub mod resource;
pub mod transactions;
pub mod users;

pub use self::accounts::AccountStore;
pub use self::auth::{AuthState, AuthStore};
pub use self::bill_payments::BillPaymentStore;
pub use self::customers::CustomerStore;
pub use self::dashboard::{AdminDashboard, BankerDashboard, CustomerDashboard};
pub use self::resource::{FetchState, Resource, Submission};
pub use self::transactions::TransactionStore;
pub use self::users::UserStore;
