//! Error types for the UnionCloud client.
//!
//! Every failure of a pipeline call is classified into exactly one variant of
//! [`Error`]. Nothing is retried or swallowed internally, so callers can match
//! on the kind (and on [`Error::code`]) to decide what to do next.

use std::fmt;
use thiserror::Error;

use crate::metadata::{Pagination, RateLimit, RequestTrace};

/// Code carried by [`Error::AuthExpired`].
pub const UNAUTHORIZED: i64 = 401;

/// The unified error type for UnionCloud operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The cached auth token is missing or past its expiry.
    ///
    /// Raised locally, before any network call is made.
    #[error("auth token has expired")]
    AuthExpired,

    /// The service answered with one of its error envelopes.
    #[error("service error: {0}")]
    Service(#[from] ServiceError),

    /// The response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Network transport errors (DNS, TLS, connection, timeout).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Locally rejected input (host, header value, path segment).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Numeric error code, where the error kind has one.
    pub fn code(&self) -> Option<i64> {
        match self {
            Error::AuthExpired => Some(UNAUTHORIZED),
            Error::Service(err) => Some(err.code),
            _ => None,
        }
    }

    /// Returns the service error, if this is one.
    pub fn as_service(&self) -> Option<&ServiceError> {
        match self {
            Error::Service(err) => Some(err),
            _ => None,
        }
    }
}

/// An error reported by the service inside a successfully received response.
///
/// Both envelope shapes (`{"errors": {...}}` and `{"error": {...}}`) end up
/// here; `message` and `code` are taken verbatim from the body.
#[derive(Debug, Clone)]
pub struct ServiceError {
    /// Error message from the service.
    pub message: String,
    /// Error code from the service.
    pub code: i64,
    /// HTTP status of the response that carried the error.
    pub status: u16,
    /// Rate-limit headers of the failed response, if present.
    pub rate_limit: Option<RateLimit>,
    /// Pagination headers of the failed response, if present.
    pub pagination: Option<Pagination>,
    /// Request trace, when debug info is enabled.
    pub trace: Option<Box<RequestTrace>>,
}

impl ServiceError {
    /// Create a new service error with no attached metadata.
    pub fn new(message: impl Into<String>, code: i64, status: u16) -> Self {
        Self {
            message: message.into(),
            code,
            status,
            rate_limit: None,
            pagination: None,
            trace: None,
        }
    }

    /// Check if the service rejected the request's credentials.
    pub fn is_auth_error(&self) -> bool {
        self.code == UNAUTHORIZED || self.status == 401
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if self.status != 0 {
            write!(f, " (HTTP {})", self.status)?;
        }
        Ok(())
    }
}

impl std::error::Error for ServiceError {}

/// Response decoding errors.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The body is not valid JSON.
    #[error("invalid JSON: {source}")]
    Json {
        #[source]
        source: serde_json::Error,
    },

    /// The body is valid JSON but not in a shape this operation can use.
    #[error("unexpected response shape: {message}")]
    UnexpectedShape { message: String },
}

impl From<serde_json::Error> for DecodeError {
    fn from(source: serde_json::Error) -> Self {
        DecodeError::Json { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Decode(DecodeError::from(err))
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed (includes DNS resolution).
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// TLS/SSL error, including certificate verification failures.
    #[error("TLS error: {message}")]
    Tls { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },

    /// An out-of-band payload could not be fetched.
    #[error("failed to load payload from {location}: {message}")]
    SideChannel { location: String, message: String },
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API host.
    #[error("invalid host '{value}': {reason}")]
    Host { value: String, reason: String },

    /// A value cannot be sent as an HTTP header.
    #[error("invalid header value for '{name}'")]
    Header { name: String },

    /// A path template and its arguments don't line up.
    #[error("invalid path '{template}': {reason}")]
    Path { template: String, reason: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auth_expired_carries_unauthorized_code() {
        assert_eq!(Error::AuthExpired.code(), Some(401));
    }

    #[test]
    fn service_error_display_includes_code_and_status() {
        let err = ServiceError::new("Invalid", 401, 200);
        assert_eq!(err.to_string(), "[401] Invalid (HTTP 200)");
        assert!(err.is_auth_error());
    }

    #[test]
    fn invalid_json_maps_to_decode_error() {
        let err: Error = serde_json::from_str::<serde_json::Value>("<html>")
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Decode(DecodeError::Json { .. })));
        assert_eq!(err.code(), None);
    }
}
