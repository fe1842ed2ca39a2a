//! Response normalization.
//!
//! Turns a raw [`ResponseEnvelope`] into an [`ApiResponse`] or a classified
//! [`Error`]:
//!
//! 1. decode the body as JSON,
//! 2. detect the `errors` envelope, then the `error` envelope,
//! 3. resolve a `file_path` large-payload reference,
//! 4. merge the request trace when debug info is enabled.
//!
//! Rate-limit and pagination headers are extracted on both the success and
//! the error path.

use serde_json::{Map, Value};
use tracing::{debug, instrument, trace};

use unioncloud_core::{
    ApiResponse, AuthToken, Error, HttpRequest, Method, PageInfo, Pagination, Query,
    RateLimit, RecordInfo, RequestTrace, ResponseEnvelope, ServiceError, Transport,
    TransportError,
};

use super::builder::USER_AGENT;

/// Key under which the request trace is merged into payloads.
pub const TRACE_KEY: &str = "request";

/// Payload key marking a large-payload reference.
pub const FILE_PATH_KEY: &str = "file_path";

const REQUEST_ID: &str = "x-request-id";
const STATUS: &str = "status";
const RUNTIME: &str = "x-runtime";
const RATELIMIT_REMAINING: &str = "x-ratelimit-remaining";
const RATELIMIT_LIMIT: &str = "x-ratelimit-limit";
const RATELIMIT_RESET: &str = "x-ratelimit-reset";
const TOTAL_PAGES: &str = "total_pages";
const RECORDS_PER_PAGE: &str = "records_per_page";
const TOTAL_RECORDS: &str = "total_records";

/// Normalizes responses for one client configuration.
pub struct ResponseNormalizer<'a> {
    transport: &'a dyn Transport,
    include_debug_info: bool,
}

impl<'a> ResponseNormalizer<'a> {
    /// Create a normalizer.
    ///
    /// `transport` is only used to fetch large payloads that live behind an
    /// HTTP(S) reference.
    pub fn new(transport: &'a dyn Transport, include_debug_info: bool) -> Self {
        Self {
            transport,
            include_debug_info,
        }
    }

    /// Normalize the response to `request`.
    ///
    /// `token` is the token the request was sent with; it only appears in
    /// the debug trace.
    #[instrument(skip_all, fields(status = envelope.status))]
    pub async fn normalize(
        &self,
        request: &HttpRequest,
        envelope: &ResponseEnvelope,
        token: Option<&AuthToken>,
    ) -> Result<ApiResponse, Error> {
        let rate_limit = rate_limit(envelope);
        let pagination = pagination(envelope, &request.query);
        let trace = self
            .include_debug_info
            .then(|| request_trace(request, envelope, token, rate_limit, pagination));

        let decoded: Value = serde_json::from_slice(&envelope.body)?;

        if let Some(mut err) = service_error(&decoded, envelope.status) {
            debug!(code = err.code, "Service returned an error envelope");
            err.rate_limit = rate_limit;
            err.pagination = pagination;
            err.trace = trace.map(Box::new);
            return Err(err.into());
        }

        let location = large_payload_reference(&decoded).map(str::to_string);
        let mut data = match location {
            Some(location) => self.load_large_payload(&location).await?,
            None => decoded,
        };

        if let Some(trace) = &trace {
            data = merge_trace(trace, data)?;
        }

        Ok(ApiResponse {
            status: envelope.status,
            data,
            rate_limit,
            pagination,
            trace,
        })
    }

    /// Read and decode the JSON behind a large-payload reference.
    #[instrument(skip(self))]
    async fn load_large_payload(&self, location: &str) -> Result<Value, Error> {
        debug!("Resolving large-payload reference");

        let bytes = if is_url(location) {
            self.fetch(location).await?
        } else {
            tokio::fs::read(location)
                .await
                .map_err(|e| TransportError::SideChannel {
                    location: location.to_string(),
                    message: e.to_string(),
                })?
        };

        trace!(len = bytes.len(), "Loaded large payload");
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Fetch a side-channel URL; no auth headers are sent.
    async fn fetch(&self, location: &str) -> Result<Vec<u8>, Error> {
        let request = HttpRequest {
            method: Method::Get,
            uri: location.to_string(),
            headers: vec![("user-agent".to_string(), USER_AGENT.to_string())],
            body: String::new(),
            attachments: Vec::new(),
            query: Query::new(),
        };

        let envelope = self.transport.execute(&request).await?;
        if !(200..300).contains(&envelope.status) {
            return Err(TransportError::SideChannel {
                location: location.to_string(),
                message: format!("HTTP {}", envelope.status),
            }
            .into());
        }
        Ok(envelope.body)
    }
}

/// Classify the two error envelopes, `errors` first.
fn service_error(decoded: &Value, status: u16) -> Option<ServiceError> {
    let object = decoded.as_object()?;

    if let Some(errors) = object.get("errors") {
        // Some endpoints send a list of errors; the first one is reported
        let errors = match errors {
            Value::Array(items) => items.first().unwrap_or(&Value::Null),
            other => other,
        };
        return Some(ServiceError::new(
            message(errors.get("error_message")),
            code(errors.get("error_code")),
            status,
        ));
    }

    if let Some(error) = object.get("error") {
        return Some(ServiceError::new(
            message(error.get("message")),
            code(error.get("code")),
            status,
        ));
    }

    None
}

fn message(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

fn code(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => int_value(s),
        _ => 0,
    }
}

fn large_payload_reference(decoded: &Value) -> Option<&str> {
    decoded.get(FILE_PATH_KEY)?.as_str()
}

fn is_url(location: &str) -> bool {
    let lower = location.to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

/// Trace is the base; the payload's own keys are laid over it.
fn merge_trace(trace: &RequestTrace, data: Value) -> Result<Value, Error> {
    let Value::Object(payload) = data else {
        return Ok(data);
    };

    let mut merged = Map::new();
    merged.insert(TRACE_KEY.to_string(), serde_json::to_value(trace)?);
    merged.extend(payload);
    Ok(Value::Object(merged))
}

fn rate_limit(envelope: &ResponseEnvelope) -> Option<RateLimit> {
    let remaining = envelope.header(RATELIMIT_REMAINING)?;
    Some(RateLimit {
        remaining: int_value(remaining),
        limit: envelope.header(RATELIMIT_LIMIT).map_or(0, int_value),
        reset: envelope.header(RATELIMIT_RESET).map_or(0, int_value),
    })
}

/// Pagination headers plus the page that was asked for (default 1).
fn pagination(envelope: &ResponseEnvelope, query: &Query) -> Option<Pagination> {
    let total_pages = envelope.header(TOTAL_PAGES)?;
    Some(Pagination {
        pages: PageInfo {
            current: query.get("page").map_or(1, int_value),
            total: int_value(total_pages),
        },
        records: RecordInfo {
            per_page: envelope.header(RECORDS_PER_PAGE).map_or(0, int_value),
            total: envelope.header(TOTAL_RECORDS).map_or(0, int_value),
        },
    })
}

fn request_trace(
    request: &HttpRequest,
    envelope: &ResponseEnvelope,
    token: Option<&AuthToken>,
    rate_limit: Option<RateLimit>,
    pagination: Option<Pagination>,
) -> RequestTrace {
    let status = envelope
        .header(STATUS)
        .map(str::to_string)
        .or_else(|| status_line(envelope.status));

    RequestTrace {
        id: envelope.header(REQUEST_ID).map(str::to_string),
        uri: request.uri.clone(),
        parameters: request.query.clone(),
        body: request.body.clone(),
        token: token.map(|t| t.as_str().to_string()),
        token_expires: token.map(|t| t.expires_at().timestamp()),
        status,
        runtime: envelope
            .header(RUNTIME)
            .and_then(|r| r.trim().parse().ok())
            .unwrap_or(0.0),
        rate_limit,
        pagination,
    }
}

fn status_line(status: u16) -> Option<String> {
    let code = reqwest::StatusCode::from_u16(status).ok()?;
    Some(match code.canonical_reason() {
        Some(reason) => format!("{} {}", status, reason),
        None => status.to_string(),
    })
}

/// Leading integer of a header value; anything unparsable is 0.
fn int_value(raw: &str) -> i64 {
    let raw = raw.trim();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map_or(0, |n| sign * n)
}
