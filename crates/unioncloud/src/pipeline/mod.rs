//! The request/response pipeline.
//!
//! `Building → Sent → Received → Classified → Returned`, terminal on the
//! first failure. [`RequestBuilder`] covers building (including the token
//! check), a [`Transport`](unioncloud_core::Transport) sends, and
//! [`ResponseNormalizer`] covers the rest.

mod builder;
mod normalizer;

pub use builder::{
    ACCEPT_VERSION_HEADER, API_VERSION, AUTH_TOKEN_HEADER, RequestBuilder, USER_AGENT,
};
pub use normalizer::{FILE_PATH_KEY, ResponseNormalizer, TRACE_KEY};
