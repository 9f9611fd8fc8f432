//! # AltoLink Common
//!
//! Provider-agnostic building blocks shared by the infrastructure adapters.
//!
//! The only module today is [`auth`]: OAuth 2.0 client-credentials token
//! types, the token-endpoint form exchange and a keyed token cache that
//! serialises refreshes.

pub mod auth;

/// Re-export of the most commonly used auth items.
pub use auth::{ClientCredentials, OAuthClientError, TokenManager, TokenSet};
