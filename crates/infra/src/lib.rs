//! # AltoLink Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite agency store with the Alto settings audit trail
//! - HTTP client with retry and timeout support
//! - Alto (Zoopla) token provider and listings client
//! - Configuration loading
//!
//! ## Architecture
//! - Implements traits defined in `altolink-core`
//! - Contains all "impure" code (I/O, network, filesystem)

pub mod config;
pub mod database;
pub mod errors;
pub mod http;
pub mod integrations;

// Re-export commonly used items
pub use database::{DbManager, SqliteAgencyRepository};
pub use errors::InfraError;
pub use http::{HttpClient, RetryPolicy};
pub use integrations::alto::{AltoApiClient, AltoTokenProvider};
