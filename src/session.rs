//! Caller-owned authentication state.
//!
//! A [`Session`] starts unauthenticated and is filled in by
//! [`VropsClient::ensure_authenticated`](crate::VropsClient::ensure_authenticated).
//! Holding it as an explicit value keeps token lifetime visible at the call
//! site: the same session can be threaded through many fetches, and dropping
//! or clearing it forces a fresh token acquisition.

use chrono::{DateTime, Utc};

/// Token state for one authenticated principal.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

impl Session {
    /// A fresh, unauthenticated session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session seeded with an externally acquired token.
    ///
    /// No expiry is recorded; the token is used as-is until cleared.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            expires_at: None,
        }
    }

    /// Whether a token is held. Expiry is not consulted.
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// The held token, if any.
    pub fn token(&self) -> Option<&str> {
        if self.token.is_empty() {
            None
        } else {
            Some(&self.token)
        }
    }

    /// When the held token expires, if the server reported a validity window.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    /// Whether the recorded expiry has passed.
    ///
    /// Informational only: authentication checks look at token presence, not
    /// expiry, so an expired session keeps being sent until the caller
    /// clears it.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(at) => at <= Utc::now(),
            None => false,
        }
    }

    /// Drop the held token, returning the session to its unauthenticated
    /// state.
    pub fn clear(&mut self) {
        self.token.clear();
        self.expires_at = None;
    }

    pub(crate) fn establish(&mut self, token: String, expires_at: Option<DateTime<Utc>>) {
        self.token = token;
        self.expires_at = expires_at;
    }
}

// Tokens are bearer credentials; keep them out of logs.
impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("token", &if self.token.is_empty() { "<none>" } else { "<redacted>" })
            .field("expires_at", &self.expires_at)
            .finish()
    }
}
