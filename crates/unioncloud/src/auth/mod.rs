//! Authentication state and request signing.
//!
//! A client holds exactly one [`AuthState`]. It is filled by a successful
//! authenticate call and only ever invalidated by the token's own expiry;
//! there is no logout and no automatic refresh.

mod signing;
mod state;

pub use signing::request_hash;
pub(crate) use signing::{AUTHENTICATE_PATH, AuthenticateRequest, parse_authenticate_response};
pub use state::AuthState;
