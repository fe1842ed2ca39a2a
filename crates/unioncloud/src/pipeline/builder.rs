//! Request assembly.

use reqwest::header::HeaderValue;
use serde_json::Value;
use tracing::trace;

use unioncloud_core::{ApiHost, AuthToken, Error, HttpRequest, InvalidInputError, RequestSpec};

use crate::auth::{AUTHENTICATE_PATH, AuthState};

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!(
    "UnionCloud API Wrapper (Rust) v",
    env!("CARGO_PKG_VERSION")
);

/// API version requested from the service.
pub const API_VERSION: &str = "v1";

/// Header carrying the auth token.
pub const AUTH_TOKEN_HEADER: &str = "auth-token";

/// Header selecting the API version.
pub const ACCEPT_VERSION_HEADER: &str = "accept-version";

/// Turns a [`RequestSpec`] into an [`HttpRequest`] for one host.
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    host: &'a ApiHost,
}

impl<'a> RequestBuilder<'a> {
    /// Create a builder for `host`.
    pub fn new(host: &'a ApiHost) -> Self {
        Self { host }
    }

    /// Assemble the request, attaching the auth token.
    ///
    /// Every path except `/authenticate` requires a fresh token.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthExpired`] when a token is required but `auth`
    /// holds none, or only an expired one.
    pub fn build(&self, spec: &RequestSpec, auth: &AuthState) -> Result<HttpRequest, Error> {
        let token = if spec.path == AUTHENTICATE_PATH {
            None
        } else {
            Some(auth.token_for_request()?)
        };
        self.assemble(spec, token)
    }

    fn assemble(
        &self,
        spec: &RequestSpec,
        token: Option<&AuthToken>,
    ) -> Result<HttpRequest, Error> {
        // The `?` is kept even for an empty query
        let uri = format!("{}?{}", self.host.api_url(&spec.path), spec.query.encode());

        let mut headers = vec![
            ("user-agent".to_string(), USER_AGENT.to_string()),
            ("content-type".to_string(), "application/json".to_string()),
            (ACCEPT_VERSION_HEADER.to_string(), API_VERSION.to_string()),
        ];
        if let Some(token) = token {
            let value = header_value(AUTH_TOKEN_HEADER, token.as_str())?;
            headers.push((AUTH_TOKEN_HEADER.to_string(), value));
        }

        let body = encode_body(spec.body.as_ref())?;

        trace!(method = %spec.method, %uri, body_len = body.len(), "Built request");

        Ok(HttpRequest {
            method: spec.method,
            uri,
            headers,
            body,
            attachments: spec.attachments.clone(),
            query: spec.query.clone(),
        })
    }
}

/// JSON-encode a body; absent or empty bodies become the empty string.
///
/// `serde_json` never escapes `/`, so URLs inside payloads go out verbatim.
fn encode_body(body: Option<&Value>) -> Result<String, Error> {
    let Some(body) = body else {
        return Ok(String::new());
    };
    let empty = match body {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    };
    if empty {
        return Ok(String::new());
    }
    serde_json::to_string(body).map_err(|e| {
        InvalidInputError::Other {
            message: format!("unserializable body: {}", e),
        }
        .into()
    })
}

fn header_value(name: &str, value: &str) -> Result<String, Error> {
    HeaderValue::from_str(value)
        .map(|_| value.to_string())
        .map_err(|_| {
            InvalidInputError::Header {
                name: name.to_string(),
            }
            .into()
        })
}
