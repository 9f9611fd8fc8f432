//! Alto integration port interfaces

use async_trait::async_trait;
use altolink_domain::{AltoEnvironment, AltoProperty, PropertyFilter, PropertyListResponse, Result};

/// Source of OAuth bearer tokens for the Alto API
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Bearer token for `environment`, reusing a cached one until it nears
    /// expiry.
    ///
    /// Fails with `AltoLinkError::Auth` when the token endpoint is unreachable
    /// or rejects the credentials.
    async fn access_token(&self, environment: AltoEnvironment) -> Result<String>;

    /// Forget the cached token for `environment`.
    async fn invalidate(&self, environment: AltoEnvironment);
}

/// Calls against the Alto listings API
///
/// `agency_ref` is only sent in production; implementations must refuse a
/// production call without one before any request leaves the process.
#[async_trait]
pub trait AltoApi: Send + Sync {
    /// Environment this client talks to
    fn environment(&self) -> AltoEnvironment;

    async fn list_properties(
        &self,
        agency_ref: Option<&str>,
        filter: &PropertyFilter,
    ) -> Result<PropertyListResponse>;

    async fn get_property(&self, property_id: &str, agency_ref: Option<&str>)
        -> Result<AltoProperty>;
}
