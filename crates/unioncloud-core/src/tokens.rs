//! Auth token types.

use std::fmt;

use chrono::{DateTime, Duration, Utc};

/// An auth token with its absolute expiry.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken {
    token: String,
    expires_at: DateTime<Utc>,
}

impl AuthToken {
    /// Create a token that expires at `expires_at`.
    pub fn new(token: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            expires_at,
        }
    }

    /// Returns the token value for use in request headers.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Returns the expiry instant.
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// A token is valid strictly before its expiry instant.
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    /// Snapshot of this token as seen at `now`.
    pub fn snapshot(&self, now: DateTime<Utc>) -> TokenSnapshot {
        TokenSnapshot {
            token: self.token.clone(),
            expires_at: self.expires_at,
            time_left: self.expires_at - now,
        }
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Read-only view of the current token.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSnapshot {
    /// Token value.
    pub token: String,
    /// Expiry instant.
    pub expires_at: DateTime<Utc>,
    /// Time until expiry; negative once expired.
    pub time_left: Duration,
}

impl fmt::Debug for TokenSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSnapshot")
            .field("token", &"[REDACTED]")
            .field("expires_at", &self.expires_at)
            .field("time_left", &self.time_left)
            .finish()
    }
}
