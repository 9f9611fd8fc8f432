//! OAuth 2.0 token types
//!
//! Token and error bodies returned by a client-credentials token endpoint
//! (RFC 6749 §4.4 and §5).

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Access token with its expiry metadata
///
/// Client-credentials grants never issue refresh tokens; a new token is
/// obtained by repeating the exchange.
#[derive(Clone, Serialize, Deserialize)]
pub struct TokenSet {
    /// Bearer token sent in the `Authorization` header
    pub access_token: String,

    /// Token type (always "Bearer" for the providers we talk to)
    pub token_type: String,

    /// Access token lifetime in seconds
    pub expires_in: i64,

    /// Absolute expiration timestamp (UTC), computed when the token arrived
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,

    /// Granted scopes (space-separated)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

impl TokenSet {
    /// Create a new `TokenSet`, stamping `expires_at` from `expires_in`
    ///
    /// A non-positive lifetime leaves `expires_at` unset.
    #[must_use]
    pub fn new(access_token: String, expires_in: i64, scope: Option<String>) -> Self {
        let expires_at = if expires_in > 0 {
            Some(Utc::now() + chrono::Duration::seconds(expires_in))
        } else {
            None
        };

        Self { access_token, token_type: "Bearer".to_string(), expires_in, expires_at, scope }
    }

    /// Check if the token is expired or will expire within `threshold_seconds`
    ///
    /// Tokens without an expiry timestamp are treated as expired so that a
    /// cache never holds one indefinitely.
    #[must_use]
    pub fn is_expired(&self, threshold_seconds: i64) -> bool {
        match self.expires_at {
            Some(expires_at) => {
                let threshold = chrono::Duration::seconds(threshold_seconds);
                Utc::now() + threshold >= expires_at
            }
            None => true,
        }
    }

    /// Seconds until expiration, `None` when no expiry is known
    #[must_use]
    pub fn seconds_until_expiry(&self) -> Option<i64> {
        self.expires_at.map(|expires_at| (expires_at - Utc::now()).num_seconds())
    }
}

impl fmt::Debug for TokenSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSet")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .field("scope", &self.scope)
            .finish()
    }
}

/// Successful token endpoint response
///
/// `token_type` and `expires_in` are optional in practice even though the RFC
/// recommends them.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
    #[serde(default)]
    pub scope: Option<String>,
}

impl TokenResponse {
    /// Convert into a `TokenSet`, using `default_lifetime_secs` when the
    /// server omitted `expires_in` or sent a non-positive value.
    #[must_use]
    pub fn into_token_set(self, default_lifetime_secs: i64) -> TokenSet {
        let lifetime = self.expires_in.filter(|secs| *secs > 0).unwrap_or(default_lifetime_secs);
        let mut tokens = TokenSet::new(self.access_token, lifetime, self.scope);
        if let Some(token_type) = self.token_type.filter(|t| !t.trim().is_empty()) {
            tokens.token_type = token_type;
        }
        tokens
    }
}

/// OAuth error response from the authorization server (RFC 6749 §5.2)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OAuthError {
    pub error: String,
    pub error_description: Option<String>,
}

impl fmt::Display for OAuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error_description {
            Some(desc) => write!(f, "{}: {}", self.error, desc),
            None => write!(f, "{}", self.error),
        }
    }
}

impl std::error::Error for OAuthError {}
