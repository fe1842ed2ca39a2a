//! unioncloud - Async client for the UnionCloud API
//!
//! One [`UnionCloud`] client holds one auth token. Every call goes through
//! the same pipeline: the request is built and checked against the token,
//! sent by a [`Transport`], and the response is normalized into an
//! [`ApiResponse`] or a classified [`Error`].
//!
//! # Example
//!
//! ```no_run
//! use unioncloud::{ApiHost, Credentials, UnionCloud, catalog::Mode};
//!
//! # async fn example() -> Result<(), unioncloud::Error> {
//! let mut client = UnionCloud::new(ApiHost::new("union.unioncloud.org")?)?;
//! let creds = Credentials::new("admin@union.test", "password", "app-id", "app-password");
//!
//! match client.authenticate(&creds).await? {
//!     Some(expires_at) => println!("authenticated until {}", expires_at),
//!     None => return Ok(()),
//! }
//!
//! let groups = client.groups(Some(Mode::Basic), None).await?;
//! if let Some(pages) = &groups.pagination {
//!     println!("page {} of {}", pages.pages.current, pages.pages.total);
//! }
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod catalog;
pub mod client;
pub mod options;
pub mod pipeline;
pub mod transport;

pub use unioncloud_core::{
    ApiHost, ApiResponse, Attachment, AuthToken, Clock, Credentials, DecodeError, Error,
    HttpRequest, InvalidInputError, ManualClock, Method, Pagination, Query, RateLimit,
    RequestSpec, RequestTrace, ResponseEnvelope, ServiceError, SystemClock, TokenSnapshot,
    Transport, TransportError,
};

pub use catalog::{Endpoint, Mode, VoterType};
pub use client::{UnionCloud, UnionCloudBuilder};
pub use options::ClientOptions;
pub use transport::{ReqwestTransport, ReqwestTransportBuilder};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
