//! Driven port for sending HTTP requests to the banking backend.
//!
//! The domain owns the request descriptor and the response envelope so the
//! authenticated client can inspect statuses (notably 401) without knowing
//! which HTTP library sits underneath.

use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::define_port_error;

/// HTTP verbs used by the banking API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// `GET`
    Get,
    /// `POST`
    Post,
    /// `DELETE`
    Delete,
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        })
    }
}

/// Request descriptor relative to the configured API base URL.
///
/// The bearer token is not part of the descriptor; it is read from the
/// session at send time so a retried request picks up a refreshed token.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// HTTP verb.
    pub method: HttpMethod,
    /// Path below the API base, starting with `/`.
    pub path: String,
    /// Query parameters, in order.
    pub query: Vec<(String, String)>,
    /// JSON body, if any.
    pub body: Option<Value>,
}

impl ApiRequest {
    /// `GET` request without query parameters.
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    /// `POST` request without a body.
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    /// `DELETE` request.
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach query parameters.
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }
}

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Raw response body.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Build a response from a status and body bytes.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Whether the backend rejected the bearer token.
    pub fn is_unauthorized(&self) -> bool {
        self.status == 401
    }

    /// Decode the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the decoder message when the body is not the expected JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, String> {
        serde_json::from_slice(&self.body).map_err(|err| err.to_string())
    }

    /// Human-readable message carried by the body.
    ///
    /// Accepts `{"message": "..."}`, a JSON string, or plain text; returns
    /// `None` for empty bodies and JSON without a message.
    pub fn message(&self) -> Option<String> {
        match serde_json::from_slice::<Value>(&self.body) {
            Ok(Value::Object(map)) => map
                .get("message")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_owned),
            Ok(Value::String(text)) => Some(text).filter(|text| !text.trim().is_empty()),
            Ok(_) => None,
            Err(_) => {
                let text = String::from_utf8_lossy(&self.body);
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_owned())
            }
        }
    }
}

define_port_error! {
    /// Errors surfaced before any HTTP status was received.
    pub enum TransportError {
        /// Connection or protocol failure.
        Transport { message: String } =>
            "backend transport failed: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "backend request timed out: {message}",
        /// The request could not be built (bad URL, unserialisable body).
        InvalidRequest { message: String } =>
            "backend request invalid: {message}",
    }
}

/// Port for exchanging one HTTP request with the backend.
#[async_trait]
pub trait ApiTransport: Send + Sync {
    /// Send `request`, attaching `Authorization: Bearer <bearer>` when given.
    ///
    /// Non-2xx statuses are returned as responses, not errors.
    async fn send(
        &self,
        request: &ApiRequest,
        bearer: Option<&str>,
    ) -> Result<ApiResponse, TransportError>;
}
