//! Response metadata snapshots.
//!
//! These are extracted from response headers independently of whether the
//! body signalled success or an error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::Query;

/// Rate-limit headers of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimit {
    /// Requests left in the current window.
    pub remaining: i64,
    /// Requests allowed per window.
    pub limit: i64,
    /// When the window resets, as reported by the service.
    pub reset: i64,
}

/// Pagination headers of a response, combined with the requested page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// Page position.
    pub pages: PageInfo,
    /// Record counts.
    pub records: RecordInfo,
}

/// Current and total page numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// The page that was requested (1 when the request named none).
    pub current: i64,
    /// Total pages available.
    pub total: i64,
}

/// Page size and total record count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordInfo {
    /// Records per page.
    pub per_page: i64,
    /// Total records across all pages.
    pub total: i64,
}

/// Diagnostic description of one request/response exchange.
///
/// Built only when debug info is enabled. When merged into a payload it
/// serializes to the `request` block the service's own tooling expects.
#[derive(Clone, Serialize)]
pub struct RequestTrace {
    /// Server-assigned request id (`X-Request-Id`).
    pub id: Option<String>,
    /// Full request URI.
    pub uri: String,
    /// Query parameters sent with the request.
    pub parameters: Query,
    /// Raw request body.
    pub body: String,
    /// Auth token in use when the request was sent.
    pub token: Option<String>,
    /// Expiry of that token, in unix seconds.
    pub token_expires: Option<i64>,
    /// HTTP status line.
    pub status: Option<String>,
    /// Server-measured runtime in seconds (`X-Runtime`).
    pub runtime: f64,
    /// Rate-limit headers, if present.
    #[serde(rename = "ratelimit", skip_serializing_if = "Option::is_none")]
    pub rate_limit: Option<RateLimit>,
    /// Pagination headers, if present.
    #[serde(flatten)]
    pub pagination: Option<Pagination>,
}

// Hide the token in Debug output
impl fmt::Debug for RequestTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestTrace")
            .field("id", &self.id)
            .field("uri", &self.uri)
            .field("parameters", &self.parameters)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("token_expires", &self.token_expires)
            .field("status", &self.status)
            .field("runtime", &self.runtime)
            .finish_non_exhaustive()
    }
}
