//! Authenticated request client.
//!
//! Wraps an [`ApiTransport`](crate::domain::ports::ApiTransport) with bearer
//! token injection and a single refresh-and-retry when the backend answers
//! 401.

mod authenticated;

pub use authenticated::{AuthenticatedClient, REFRESH_PATH};
pub use crate::domain::ports::ApiError;
