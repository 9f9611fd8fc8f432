//! Token manager with single-flight refresh
//!
//! Keeps one access token per key (an environment, a tenant, ...) in memory:
//! - Cached tokens are reused until they come within the refresh threshold
//! - Concurrent callers that miss the cache share one refresh
//! - A token the remote API rejected can be dropped with `invalidate`

use std::collections::HashMap;
use std::fmt::Debug;
use std::future::Future;
use std::hash::Hash;

use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use super::types::TokenSet;

/// In-memory token cache keyed by `K`
///
/// Refreshes for all keys are serialised through one lock. Token endpoints
/// are called rarely enough that per-key locking is not worth the extra map.
pub struct TokenManager<K> {
    tokens: RwLock<HashMap<K, TokenSet>>,
    refresh_lock: Mutex<()>,
    refresh_threshold_seconds: i64,
}

impl<K> TokenManager<K>
where
    K: Eq + Hash + Clone + Debug + Send + Sync,
{
    /// Create a new token manager
    ///
    /// # Arguments
    /// * `refresh_threshold_seconds` - Treat tokens as expired this many
    ///   seconds before their actual expiry
    #[must_use]
    pub fn new(refresh_threshold_seconds: i64) -> Self {
        Self {
            tokens: RwLock::new(HashMap::new()),
            refresh_lock: Mutex::new(()),
            refresh_threshold_seconds,
        }
    }

    /// Return a valid cached token for `key`, running `refresh` otherwise
    ///
    /// `refresh` is only invoked when no usable token exists after acquiring
    /// the refresh lock, so callers that queued behind an in-flight refresh
    /// pick up its result instead of exchanging again.
    ///
    /// # Errors
    /// Returns whatever `refresh` returns; nothing is cached on failure.
    pub async fn get_or_refresh<F, Fut, E>(&self, key: &K, refresh: F) -> Result<String, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<TokenSet, E>>,
    {
        if let Some(token) = self.cached_token(key).await {
            return Ok(token);
        }

        let _guard = self.refresh_lock.lock().await;

        if let Some(token) = self.cached_token(key).await {
            debug!(key = ?key, "token refreshed by a concurrent caller");
            return Ok(token);
        }

        let tokens = refresh().await?;
        let access_token = tokens.access_token.clone();
        info!(
            key = ?key,
            expires_in = tokens.expires_in,
            "obtained new access token"
        );
        self.tokens.write().await.insert(key.clone(), tokens);

        Ok(access_token)
    }

    /// Cached access token for `key` if it is outside the refresh window
    pub async fn cached_token(&self, key: &K) -> Option<String> {
        let tokens = self.tokens.read().await;
        tokens
            .get(key)
            .filter(|t| !t.is_expired(self.refresh_threshold_seconds))
            .map(|t| t.access_token.clone())
    }

    /// Replace the token stored for `key`
    pub async fn store(&self, key: K, tokens: TokenSet) {
        self.tokens.write().await.insert(key, tokens);
    }

    /// Drop the token for `key`; returns whether one was cached
    pub async fn invalidate(&self, key: &K) -> bool {
        let removed = self.tokens.write().await.remove(key).is_some();
        if removed {
            debug!(key = ?key, "invalidated cached access token");
        }
        removed
    }

    /// Seconds until the token for `key` expires
    pub async fn seconds_until_expiry(&self, key: &K) -> Option<i64> {
        self.tokens.read().await.get(key).and_then(TokenSet::seconds_until_expiry)
    }

    /// Get refresh threshold in seconds
    #[must_use]
    pub fn refresh_threshold(&self) -> i64 {
        self.refresh_threshold_seconds
    }
}
