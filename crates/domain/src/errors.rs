//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for AltoLink
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum AltoLinkError {
    #[error("Database error: {0}")]
    Database(String),

    /// Missing or inconsistent configuration, including a production call for
    /// an agency that has no AgencyRef.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Token endpoint unreachable or client credentials rejected.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The partner answered 400/403 to a production call.
    #[error("Partner rejected request: {0}")]
    PartnerRejected(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for AltoLink operations
pub type Result<T> = std::result::Result<T, AltoLinkError>;
