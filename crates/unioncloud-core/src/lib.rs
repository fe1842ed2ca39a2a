//! unioncloud-core - Core types and traits for the UnionCloud API client.
//!
//! The request pipeline in the `unioncloud` crate is built on the seams
//! defined here: the [`Transport`] that executes one HTTP request, the
//! [`Clock`] that decides token freshness, and the [`Error`] taxonomy every
//! call is classified into.

pub mod credentials;
pub mod error;
pub mod http;
pub mod metadata;
pub mod response;
pub mod tokens;
pub mod traits;
pub mod types;

pub use credentials::Credentials;
pub use error::{DecodeError, Error, InvalidInputError, ServiceError, TransportError};
pub use http::{Attachment, HttpRequest, Method, RequestSpec, ResponseEnvelope};
pub use metadata::{PageInfo, Pagination, RateLimit, RecordInfo, RequestTrace};
pub use response::ApiResponse;
pub use tokens::{AuthToken, TokenSnapshot};
pub use traits::{Clock, ManualClock, SystemClock, Transport};
pub use types::{ApiHost, Query};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
