//! Validated input types.

mod api_host;
mod query;

pub use api_host::ApiHost;
pub use query::Query;
