//! Transport trait.

use async_trait::async_trait;

use crate::error::TransportError;
use crate::http::{HttpRequest, ResponseEnvelope};

/// Executes exactly one HTTP request.
///
/// Implementations must not retry, and must surface certificate verification
/// failures as [`TransportError::Tls`] rather than bypassing them.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the raw response.
    async fn execute(&self, request: &HttpRequest) -> Result<ResponseEnvelope, TransportError>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn execute(&self, request: &HttpRequest) -> Result<ResponseEnvelope, TransportError> {
        (**self).execute(request).await
    }
}
