//! Normalized success result.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{DecodeError, Error};
use crate::metadata::{Pagination, RateLimit, RequestTrace};

/// A successful, normalized API response.
///
/// `data` is the decoded payload with any large-payload reference already
/// resolved. When debug info is enabled and the payload is an object, the
/// request trace is also merged into `data` under the `request` key.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Decoded payload.
    pub data: Value,
    /// Rate-limit headers, if present.
    pub rate_limit: Option<RateLimit>,
    /// Pagination headers, if present.
    pub pagination: Option<Pagination>,
    /// Request trace, when debug info is enabled.
    pub trace: Option<RequestTrace>,
}

impl ApiResponse {
    /// Look up a top-level key of the payload.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Decode the payload into a typed shape.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, Error> {
        T::deserialize(&self.data).map_err(|e| Error::Decode(DecodeError::from(e)))
    }

    /// Decode the payload's `response` member, where most endpoints put their data.
    pub fn decode_response<T: DeserializeOwned>(&self) -> Result<T, Error> {
        let inner = self.data.get("response").ok_or_else(|| DecodeError::UnexpectedShape {
            message: "missing 'response' member".to_string(),
        })?;
        T::deserialize(inner).map_err(|e| Error::Decode(DecodeError::from(e)))
    }

    /// Consume the response, returning the payload.
    pub fn into_data(self) -> Value {
        self.data
    }
}
