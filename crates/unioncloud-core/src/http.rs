//! Transport-neutral request and response envelopes.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;

use crate::types::Query;

/// HTTP methods used by the UnionCloud API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Upper-case method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A file sent as part of a multipart upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// Form field name.
    pub field: String,
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type, if known.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl Attachment {
    /// Create an attachment with no explicit content type.
    pub fn new(field: impl Into<String>, file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: field.into(),
            file_name: file_name.into(),
            content_type: None,
            bytes,
        }
    }

    /// Set the MIME type.
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }
}

/// A logical API request: what to call, before headers and auth are applied.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestSpec {
    /// HTTP method.
    pub method: Method,
    /// Endpoint path below `/api`, already percent-encoded (e.g. `/users/42`).
    pub path: String,
    /// Query parameters.
    pub query: Query,
    /// JSON body, if any.
    pub body: Option<Value>,
    /// Multipart attachments; empty for almost every endpoint.
    pub attachments: Vec<Attachment>,
}

impl RequestSpec {
    /// Create a request with no query, body, or attachments.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Query::new(),
            body: None,
            attachments: Vec::new(),
        }
    }

    /// Set the query parameters.
    pub fn with_query(mut self, query: Query) -> Self {
        self.query = query;
        self
    }

    /// Set the JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a multipart attachment.
    pub fn with_attachment(mut self, attachment: Attachment) -> Self {
        self.attachments.push(attachment);
        self
    }
}

/// A fully assembled request, ready for a [`Transport`](crate::traits::Transport).
#[derive(Clone, PartialEq)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute request URI including the query string.
    pub uri: String,
    /// Request headers in the order they should be sent.
    pub headers: Vec<(String, String)>,
    /// Serialized body; empty when the request has none.
    pub body: String,
    /// Multipart attachments.
    pub attachments: Vec<Attachment>,
    /// The query parameters encoded into `uri`.
    pub query: Query,
}

impl HttpRequest {
    /// Look up a request header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

// Header values may contain the auth token
impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let headers: Vec<&str> = self.headers.iter().map(|(k, _)| k.as_str()).collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("uri", &self.uri)
            .field("headers", &headers)
            .field("body_len", &self.body.len())
            .field("attachments", &self.attachments.len())
            .finish()
    }
}

/// Raw result of one transport execution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseEnvelope {
    /// HTTP status code.
    pub status: u16,
    /// Response headers keyed by lower-cased name; first value wins.
    pub headers: BTreeMap<String, String>,
    /// Raw body bytes.
    pub body: Vec<u8>,
}

impl ResponseEnvelope {
    /// Create an envelope with no headers.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Add a header, keeping any value already stored under the same name.
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.insert_header(name, value);
        self
    }

    /// Insert a header, keeping any value already stored under the same name.
    pub fn insert_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers
            .entry(name.to_ascii_lowercase())
            .or_insert_with(|| value.into());
    }

    /// Look up a header by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_headers_are_case_insensitive_and_first_wins() {
        let env = ResponseEnvelope::new(200, "{}")
            .with_header("X-Request-Id", "first")
            .with_header("x-request-id", "second");
        assert_eq!(env.header("X-REQUEST-ID"), Some("first"));
    }

    #[test]
    fn request_debug_hides_header_values() {
        let request = HttpRequest {
            method: Method::Get,
            uri: "https://example.test/api/users?".into(),
            headers: vec![("auth-token".into(), "secret".into())],
            body: String::new(),
            attachments: Vec::new(),
            query: Query::new(),
        };
        let debug = format!("{:?}", request);
        assert!(debug.contains("auth-token"));
        assert!(!debug.contains("secret"));
        assert_eq!(request.header("Auth-Token"), Some("secret"));
    }
}
