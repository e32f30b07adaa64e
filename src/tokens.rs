//! OAuth token material and the credential supplier boundary.
//!
//! The REST layer only ever needs a current bearer token string; acquiring
//! and refreshing tokens is the caller's job. [`Tokens`] is the plain data
//! carrier and doubles as the trivial [`TokenProvider`].

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Supplier of the current bearer token.
///
/// Implemented by [`Tokens`] for a static token; callers with refresh flows
/// provide their own implementation. The REST layer borrows the token per
/// request and never mutates or persists it.
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// The bearer token to use for the next request.
    async fn access_token(&self) -> String;
}

/// OAuth tokens with expiration bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tokens {
    /// Current bearer token.
    pub access_token: String,
    /// Token lifetime in seconds as reported at issuance.
    #[serde(default)]
    pub expires_in: u64,
    /// Absolute expiration; set via [`Tokens::set_expiration`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Refresh token, when the grant provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Refresh token lifetime in seconds.
    #[serde(default)]
    pub refresh_token_expires_in: u64,
    /// Absolute refresh token expiration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token_expires_at: Option<DateTime<Utc>>,
    /// Token type; always `Bearer`.
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "Bearer".to_string()
}

impl Tokens {
    /// Tokens carrying only an access token (e.g. a developer token).
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            expires_in: 0,
            expires_at: None,
            refresh_token: None,
            refresh_token_expires_in: 0,
            refresh_token_expires_at: None,
            token_type: default_token_type(),
        }
    }

    /// Derive absolute expirations from the relative lifetimes.
    ///
    /// Only fills expirations that are not already set.
    pub fn set_expiration(&mut self) {
        let now = Utc::now();
        if self.expires_at.is_none() {
            self.expires_at = Some(now + Duration::seconds(self.expires_in as i64));
        }
        if self.refresh_token_expires_at.is_none() {
            self.refresh_token_expires_at =
                Some(now + Duration::seconds(self.refresh_token_expires_in as i64));
        }
    }

    /// Seconds until the access token expires; zero when unknown or empty.
    pub fn remaining(&self) -> i64 {
        if self.access_token.is_empty() {
            return 0;
        }
        self.expires_at
            .map(|at| (at - Utc::now()).num_seconds())
            .unwrap_or(0)
    }

    /// True when the access token is missing or expires within 5 minutes.
    pub fn needs_refresh(&self) -> bool {
        self.access_token.is_empty() || self.remaining() < 300
    }
}

#[async_trait]
impl TokenProvider for Tokens {
    async fn access_token(&self) -> String {
        self.access_token.clone()
    }
}
