//! Auth token lifecycle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::debug;

use unioncloud_core::{AuthToken, Clock, Error, TokenSnapshot};

/// Holds the client's current auth token and decides whether it is fresh.
///
/// No locking: a client is a single logical session, and mutation goes
/// through `&mut self`.
pub struct AuthState {
    token: Option<AuthToken>,
    clock: Arc<dyn Clock>,
}

impl AuthState {
    /// Create an empty state reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { token: None, clock }
    }

    /// Returns the current instant according to this state's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// True iff a token is stored and `now < expires_at`.
    pub fn is_valid(&self) -> bool {
        let now = self.now();
        self.token.as_ref().is_some_and(|t| t.is_valid_at(now))
    }

    /// Replace the stored token unconditionally, returning its expiry.
    pub fn set(&mut self, token: impl Into<String>, expires_at: DateTime<Utc>) -> DateTime<Utc> {
        debug!(%expires_at, "Storing auth token");
        self.token = Some(AuthToken::new(token, expires_at));
        expires_at
    }

    /// Read-only snapshot of the stored token, if any.
    pub fn get(&self) -> Option<TokenSnapshot> {
        let now = self.now();
        self.token.as_ref().map(|t| t.snapshot(now))
    }

    /// The stored token, whether or not it is still valid.
    pub fn current(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// The stored token if it is still valid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AuthExpired`] if no token is stored or it has expired.
    pub fn token_for_request(&self) -> Result<&AuthToken, Error> {
        let now = self.now();
        match &self.token {
            Some(token) if token.is_valid_at(now) => Ok(token),
            Some(token) => {
                debug!(expires_at = %token.expires_at(), "Auth token has expired");
                Err(Error::AuthExpired)
            }
            None => Err(Error::AuthExpired),
        }
    }
}

impl std::fmt::Debug for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthState")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use unioncloud_core::ManualClock;

    fn state_at(secs: i64) -> (AuthState, ManualClock) {
        let clock = ManualClock::at_timestamp(secs);
        (AuthState::new(Arc::new(clock.clone())), clock)
    }

    #[test]
    fn empty_state_is_invalid() {
        let (state, _) = state_at(1_000);
        assert!(!state.is_valid());
        assert!(state.get().is_none());
        assert!(matches!(state.token_for_request(), Err(Error::AuthExpired)));
    }

    #[test]
    fn set_returns_expiry_and_validates_strictly() {
        let (mut state, clock) = state_at(1_000);
        let expiry = clock.now() + Duration::seconds(60);
        assert_eq!(state.set("abc", expiry), expiry);
        assert!(state.is_valid());

        clock.set(expiry);
        assert!(!state.is_valid());
        assert!(matches!(state.token_for_request(), Err(Error::AuthExpired)));
    }

    #[test]
    fn set_in_the_past_is_immediately_invalid() {
        let (mut state, clock) = state_at(1_000);
        state.set("abc", clock.now() - Duration::seconds(1));
        assert!(!state.is_valid());
    }

    #[test]
    fn set_overwrites_previous_token() {
        let (mut state, clock) = state_at(1_000);
        state.set("old", clock.now() + Duration::seconds(10));
        state.set("new", clock.now() + Duration::seconds(20));
        assert_eq!(state.token_for_request().unwrap().as_str(), "new");
    }

    #[test]
    fn snapshot_reports_negative_time_left() {
        let (mut state, clock) = state_at(1_000);
        state.set("abc", clock.now() + Duration::seconds(5));
        clock.advance(Duration::seconds(8));
        assert_eq!(state.get().unwrap().time_left.num_seconds(), -3);
    }
}
