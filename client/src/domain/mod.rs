//! Domain primitives, validation, and ports.
//!
//! Purpose: define the strongly typed entities exchanged with the banking
//! backend and the rules the client enforces before any network call.
//! Serialisation contracts (camelCase JSON, SCREAMING_SNAKE_CASE enums) are
//! documented on each type.
//!
//! Public surface:
//! - DomainError / ErrorCode: store-level failure surfaced to callers.
//! - SessionHandle: explicitly passed session context.
//! - Role, User, Customer: identities and listings.
//! - Account, Transaction, ScheduledPayment: banking records.
//! - navigation, validation, format: pure helpers for presentation layers.

pub mod account;
pub mod auth;
pub mod bill_payment;
pub mod claims;
pub mod error;
pub mod format;
pub mod ids;
pub mod money;
pub mod navigation;
pub mod ports;
pub mod session;
pub mod timestamp;
pub mod transaction;
pub mod user;
pub mod validation;

pub use self::account::{Account, NewAccount, TransferRequest};
pub use self::auth::{LoginCredentials, LoginValidationError, Registration, TokenPair};
pub use self::bill_payment::{
    BillPaymentRequest, Frequency, FrequencyParseError, PaymentStatus, RecurringPaymentRequest,
    ScheduledPayment,
};
pub use self::claims::{AccessTokenClaims, ClaimsError, decode_access_token};
pub use self::error::{DomainError, ErrorCode, ErrorValidationError};
pub use self::ids::{AccountId, PaymentId, TransactionId, UserId};
pub use self::money::{HIGH_VALUE_THRESHOLD, is_high_value, parse_amount};
pub use self::navigation::{RouteDecision, authorize, default_dashboard};
pub use self::session::{Session, SessionHandle};
pub use self::timestamp::Timestamp;
pub use self::transaction::{
    Transaction, TransactionFilters, TransactionParseError, TransactionStatus, TransactionType,
};
pub use self::user::{Customer, Role, RoleParseError, User};
pub use self::validation::FormErrors;
