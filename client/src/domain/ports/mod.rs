//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (`ApiTransport`, `SessionStorage`) are implemented in
//! `crate::outbound`. Driving ports (`AuthApi`, `AccountsApi`, and friends)
//! are implemented by `crate::api::BankingApi` and consumed by the stores.

mod macros;
pub(crate) use macros::define_port_error;

mod accounts_api;
mod admin_api;
mod api_error;
mod auth_api;
mod banker_api;
mod bill_payment_api;
mod session_storage;
mod transport;

#[cfg(test)]
pub use accounts_api::MockAccountsApi;
pub use accounts_api::AccountsApi;
#[cfg(test)]
pub use admin_api::MockAdminApi;
pub use admin_api::AdminApi;
pub use api_error::ApiError;
#[cfg(test)]
pub use auth_api::MockAuthApi;
pub use auth_api::AuthApi;
#[cfg(test)]
pub use banker_api::MockBankerApi;
pub use banker_api::BankerApi;
#[cfg(test)]
pub use bill_payment_api::MockBillPaymentApi;
pub use bill_payment_api::BillPaymentApi;
#[cfg(test)]
pub use session_storage::MockSessionStorage;
pub use session_storage::{MemorySessionStorage, SessionStorage, SessionStorageError};
pub use transport::{ApiRequest, ApiResponse, ApiTransport, HttpMethod, TransportError};
