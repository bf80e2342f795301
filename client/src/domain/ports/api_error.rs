//! Error returned by the API ports.

use crate::domain::{DomainError, ErrorCode};

use super::{SessionStorageError, TransportError};

/// Failure of one backend call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The backend answered with a non-2xx status.
    #[error("backend returned status {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message carried by the response body, if any.
        message: Option<String>,
    },
    /// No response was received.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// A 2xx response carried a body of the wrong shape.
    #[error("backend response could not be decoded: {message}")]
    Decode {
        /// Decoder message.
        message: String,
    },
    /// The session could not be read or persisted.
    #[error(transparent)]
    Session(#[from] SessionStorageError),
}

impl ApiError {
    /// Build a status error.
    pub fn status(status: u16, message: Option<String>) -> Self {
        Self::Status { status, message }
    }

    /// Build a decode error.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// HTTP status, when the backend answered.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether this is a 401 from the backend.
    pub fn is_unauthorized(&self) -> bool {
        self.http_status() == Some(401)
    }

    /// Convert into the store-level error.
    ///
    /// Backend messages are kept; otherwise `fallback` (such as
    /// `"Failed to fetch accounts"`) is used, which is also the text shown
    /// for network and unknown failures.
    pub fn into_store_error(self, fallback: &str) -> DomainError {
        match self {
            Self::Status { status, message } => {
                let code = match status {
                    401 => ErrorCode::Unauthorized,
                    403 => ErrorCode::Forbidden,
                    404 => ErrorCode::NotFound,
                    400..=499 => ErrorCode::InvalidRequest,
                    _ => ErrorCode::InternalError,
                };
                DomainError::with_fallback(code, message.as_deref(), fallback).with_status(status)
            }
            Self::Transport(_) => DomainError::network(fallback),
            Self::Decode { .. } | Self::Session(_) => DomainError::internal(fallback),
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(400, ErrorCode::InvalidRequest)]
    #[case(401, ErrorCode::Unauthorized)]
    #[case(403, ErrorCode::Forbidden)]
    #[case(404, ErrorCode::NotFound)]
    #[case(409, ErrorCode::InvalidRequest)]
    #[case(500, ErrorCode::InternalError)]
    fn statuses_map_to_store_codes(#[case] status: u16, #[case] expected: ErrorCode) {
        let err = ApiError::status(status, Some("backend says no".to_owned()))
            .into_store_error("Failed to fetch accounts");
        assert_eq!(err.code(), expected);
        assert_eq!(err.message(), "backend says no");
        assert_eq!(err.status(), Some(status));
    }

    #[rstest]
    fn network_failures_use_the_generic_message() {
        let err = ApiError::from(TransportError::timeout("10s elapsed"))
            .into_store_error("Failed to fetch customers");
        assert_eq!(err.code(), ErrorCode::Network);
        assert_eq!(err.message(), "Failed to fetch customers");
    }

    #[rstest]
    fn status_without_message_uses_fallback() {
        let err = ApiError::status(500, None).into_store_error("Transfer failed");
        assert_eq!(err.message(), "Transfer failed");
    }
}
