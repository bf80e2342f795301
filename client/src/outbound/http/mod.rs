//! HTTP transport adapter.
//!
//! A thin reqwest implementation of the `ApiTransport` port.

mod reqwest_transport;

pub use reqwest_transport::{ReqwestTransport, TRACE_ID_HEADER};
