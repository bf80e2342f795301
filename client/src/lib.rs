//! Client library for the online banking REST API.
//!
//! The crate is laid out as a small hexagon:
//! - [`domain`] holds typed entities, validation, the session handle, and the
//!   ports the rest of the crate is written against.
//! - [`outbound`] implements the transport and session storage ports with
//!   reqwest and a capability-scoped session file.
//! - [`client`] wraps a transport with bearer-token injection and the single
//!   refresh-and-retry on 401.
//! - [`api`] maps each backend endpoint onto the API ports.
//! - [`stores`] keeps per-domain state driven by those ports.
//! - [`cli`] is the command-line surface used by the `banking-client` binary.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod outbound;
pub mod stores;

pub use client::{ApiError, AuthenticatedClient};
pub use config::ClientSettings;
pub use domain::{DomainError, ErrorCode, SessionHandle};
