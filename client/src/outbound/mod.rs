//! Outbound adapters implementing the driven ports.
//!
//! - **http**: reqwest-backed [`ApiTransport`](crate::domain::ports::ApiTransport)
//! - **storage**: JSON session file behind
//!   [`SessionStorage`](crate::domain::ports::SessionStorage)
//!
//! Adapters translate between domain types and infrastructure details. They
//! contain no business logic.

pub mod http;
pub mod storage;
