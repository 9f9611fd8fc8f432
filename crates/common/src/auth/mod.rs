//! OAuth 2.0 client-credentials support
//!
//! Partner APIs that authenticate machine-to-machine (no user, no browser)
//! share three pieces:
//!
//! - **[`types`]**: `TokenSet`, the token endpoint's success and error bodies
//! - **[`client`]**: `ClientCredentials` and the token response parser
//! - **[`token_manager`]**: an in-memory token cache keyed by caller-chosen
//!   key, with at most one refresh in flight
//!
//! The HTTP transport itself (timeouts, retries) belongs to the caller; this
//! module only shapes the form body and interprets the response.
//!
//! # Example
//!
//! ```rust,no_run
//! use altolink_common::auth::{parse_token_response, ClientCredentials, TokenManager};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let credentials = ClientCredentials::new(
//!     "https://oauth.example.com/token",
//!     "client-id",
//!     "client-secret",
//!     Some("api".to_string()),
//! );
//! let manager: TokenManager<&'static str> = TokenManager::new(60);
//! let http = reqwest::Client::new();
//!
//! let token = manager
//!     .get_or_refresh(&"sandbox", || async {
//!         let response = http
//!             .post(credentials.token_url())
//!             .form(&credentials.form_params())
//!             .send()
//!             .await?;
//!         parse_token_response(response, 3600).await
//!     })
//!     .await?;
//! # let _ = token;
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod token_manager;
pub mod types;

pub use client::{parse_token_response, ClientCredentials, OAuthClientError};
pub use token_manager::TokenManager;
pub use types::{OAuthError, TokenResponse, TokenSet};
