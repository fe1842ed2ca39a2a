//! reqwest-backed [`Transport`].

use std::error::Error as _;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::{Form, Part};
use tracing::{debug, instrument, trace};

use unioncloud_core::{
    Error, HttpRequest, InvalidInputError, Method, ResponseEnvelope, Transport, TransportError,
};

/// Connection-level timeout used unless overridden.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTPS transport over reqwest with rustls.
///
/// Certificate verification is always on. With
/// [`ReqwestTransportBuilder::with_pinned_roots`] the built-in root store is
/// replaced by the given PEM bundle, so only that bundle is trusted.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Create a transport with the default connect timeout and built-in roots.
    pub fn new() -> Result<Self, Error> {
        Self::builder().build()
    }

    /// Start building a transport.
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }
}

/// Builder for [`ReqwestTransport`].
#[derive(Debug, Clone)]
pub struct ReqwestTransportBuilder {
    connect_timeout: Duration,
    request_timeout: Option<Duration>,
    pinned_roots: Option<Vec<u8>>,
}

impl Default for ReqwestTransportBuilder {
    fn default() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            request_timeout: None,
            pinned_roots: None,
        }
    }
}

impl ReqwestTransportBuilder {
    /// Set the timeout for establishing a connection.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set a deadline for the whole request, body download included.
    ///
    /// Off by default: large voter listings can take a long time to stream.
    pub fn request_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Trust only the certificates in this PEM bundle.
    pub fn with_pinned_roots(mut self, pem: impl Into<Vec<u8>>) -> Self {
        self.pinned_roots = Some(pem.into());
        self
    }

    /// Build the transport.
    ///
    /// # Errors
    ///
    /// Returns an error if the PEM bundle is unreadable or empty, or the TLS
    /// backend cannot be initialised.
    pub fn build(self) -> Result<ReqwestTransport, Error> {
        let mut builder = reqwest::Client::builder().connect_timeout(self.connect_timeout);
        if let Some(timeout) = self.request_timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(pem) = &self.pinned_roots {
            let certs = reqwest::Certificate::from_pem_bundle(pem).map_err(|e| {
                InvalidInputError::Other {
                    message: format!("invalid PEM bundle: {}", e),
                }
            })?;
            if certs.is_empty() {
                return Err(InvalidInputError::Other {
                    message: "PEM bundle contains no certificates".to_string(),
                }
                .into());
            }
            builder = builder.tls_built_in_root_certs(false);
            for cert in certs {
                builder = builder.add_root_certificate(cert);
            }
        }

        let client = builder.build().map_err(|e| TransportError::Tls {
            message: e.to_string(),
        })?;

        Ok(ReqwestTransport { client })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    #[instrument(skip_all, fields(method = %request.method, uri = %request.uri))]
    async fn execute(&self, request: &HttpRequest) -> Result<ResponseEnvelope, TransportError> {
        debug!("Sending request");

        let mut builder = self.client.request(method(request.method), &request.uri);

        let multipart = !request.attachments.is_empty();
        for (name, value) in &request.headers {
            // reqwest sets the multipart content type with its boundary
            if multipart && name.eq_ignore_ascii_case(CONTENT_TYPE.as_str()) {
                continue;
            }
            builder = builder.header(name.as_str(), value.as_str());
        }

        if multipart {
            builder = builder.multipart(form(request)?);
        } else if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        let response = builder.send().await.map_err(transport_error)?;

        let mut envelope = ResponseEnvelope::new(response.status().as_u16(), Vec::new());
        for (name, value) in response.headers() {
            envelope.insert_header(name.as_str(), String::from_utf8_lossy(value.as_bytes()));
        }
        envelope.body = response.bytes().await.map_err(transport_error)?.to_vec();

        trace!(status = envelope.status, len = envelope.body.len(), "Received response");
        Ok(envelope)
    }
}

fn method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Multipart form: the JSON body as a `data` part, then each attachment.
fn form(request: &HttpRequest) -> Result<Form, TransportError> {
    let mut form = Form::new();
    if !request.body.is_empty() {
        form = form.text("data", request.body.clone());
    }
    for attachment in &request.attachments {
        let mut part =
            Part::bytes(attachment.bytes.clone()).file_name(attachment.file_name.clone());
        if let Some(content_type) = &attachment.content_type {
            part = part.mime_str(content_type).map_err(|e| TransportError::Http {
                message: format!("invalid content type '{}': {}", content_type, e),
            })?;
        }
        form = form.part(attachment.field.clone(), part);
    }
    Ok(form)
}

/// Classify a reqwest failure.
fn transport_error(err: reqwest::Error) -> TransportError {
    let message = err.to_string();
    if err.is_timeout() {
        TransportError::Timeout { message }
    } else if is_tls_failure(&err) {
        TransportError::Tls {
            message: source_chain(&err),
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: source_chain(&err),
        }
    } else {
        TransportError::Http { message }
    }
}

/// A connect failure caused by rustls somewhere in the source chain.
fn is_tls_failure(err: &reqwest::Error) -> bool {
    if !err.is_connect() {
        return false;
    }
    let mut source = err.source();
    while let Some(inner) = source {
        if is_rustls_error(inner) {
            return true;
        }
        source = inner.source();
    }
    false
}

fn is_rustls_error(err: &(dyn std::error::Error + 'static)) -> bool {
    if err.is::<rustls::Error>() {
        return true;
    }
    // io::Error::source skips its payload, so look inside directly
    err.downcast_ref::<std::io::Error>()
        .and_then(std::io::Error::get_ref)
        .is_some_and(|inner| is_rustls_error(inner))
}

fn source_chain(err: &reqwest::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        message.push_str(": ");
        message.push_str(&inner.to_string());
        source = inner.source();
    }
    message
}
