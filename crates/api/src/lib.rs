//! # AltoLink API
//!
//! HTTP application layer - routes and main entry point.
//!
//! This crate contains:
//! - Admin routes for editing each agency's AgencyRef and production toggle
//! - Internal routes that proxy Alto property lookups for an agency
//! - Application context (dependency injection)
//! - Main entry point and setup
//!
//! ## Architecture
//! - Depends on `domain`, `core`, and `infra`
//! - Wires up the hexagonal architecture
//! - Maps domain errors onto HTTP statuses in one place

pub mod commands;
pub mod context;
pub mod error;
pub mod utils;

pub use commands::router;
pub use context::AppContext;
pub use error::{ApiError, ErrorBody, ErrorResponse};
