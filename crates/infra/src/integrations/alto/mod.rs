//! Alto (Zoopla) integration
//!
//! # Architecture
//!
//! - **Auth**: `AltoTokenProvider` - OAuth2 client-credentials exchange with a
//!   per-environment token cache
//! - **Client**: `AltoApiClient` - listings API calls with the bearer token
//!   and, in production, the agency's `X-AgencyRef`
//!
//! # Usage
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use altolink_core::AltoApi;
//! use altolink_domain::{AltoConfig, AltoEnvironment, PropertyFilter};
//! use altolink_infra::integrations::alto::{AltoApiClient, AltoTokenProvider};
//!
//! # async fn example() -> altolink_domain::Result<()> {
//! let config = AltoConfig::new(AltoEnvironment::Production, "client-id", "client-secret");
//! let tokens = Arc::new(AltoTokenProvider::new(config.clone())?);
//! let client = AltoApiClient::new(&config, tokens)?;
//!
//! let page = client.list_properties(Some("ABC123"), &PropertyFilter::default()).await?;
//! # let _ = page;
//! # Ok(())
//! # }
//! ```

pub mod auth;
pub mod client;

pub use auth::AltoTokenProvider;
pub use client::AltoApiClient;
