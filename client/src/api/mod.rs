//! Backend endpoint mapping.
//!
//! [`BankingApi`] implements every driving port on top of an
//! [`AuthenticatedClient`]: it builds the request for each endpoint, decodes
//! the JSON reply, and leaves status handling to the client.

mod accounts;
mod admin;
mod auth;
mod banker;
mod bill_payments;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::AuthenticatedClient;
use crate::domain::ports::{ApiError, ApiResponse, ApiTransport, TransportError};

/// Typed access to the banking REST API.
#[derive(Debug)]
pub struct BankingApi<T> {
    client: AuthenticatedClient<T>,
}

impl<T> Clone for BankingApi<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
        }
    }
}

impl<T: ApiTransport> BankingApi<T> {
    /// Map endpoints onto `client`.
    pub fn new(client: AuthenticatedClient<T>) -> Self {
        Self { client }
    }

    /// Underlying authenticated client.
    pub fn client(&self) -> &AuthenticatedClient<T> {
        &self.client
    }
}

fn json_body<S: Serialize>(value: &S) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|err| {
        ApiError::from(TransportError::invalid_request(format!(
            "request body could not be serialised: {err}"
        )))
    })
}

fn decode<D: DeserializeOwned>(response: &ApiResponse) -> Result<D, ApiError> {
    response.json().map_err(ApiError::decode)
}

/// Lists may come back as `null` or an empty body when there is nothing to show.
fn decode_list<D: DeserializeOwned>(response: &ApiResponse) -> Result<Vec<D>, ApiError> {
    if response.body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Vec::new());
    }
    decode::<Option<Vec<D>>>(response).map(Option::unwrap_or_default)
}
