//! # AltoLink Domain
//!
//! Business domain types and models for AltoLink.
//!
//! This crate contains:
//! - Agency records extended with Alto integration settings
//! - The append-only audit entry recorded on every settings change
//! - Alto (Zoopla) listing schemas
//! - Domain error types and Result definitions
//! - Configuration structures and partner constants
//!
//! ## Architecture
//! - No dependencies on other AltoLink crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
