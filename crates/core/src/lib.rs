//! # AltoLink Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port interfaces (traits) for the agency store and the Alto partner API
//! - The outbound request header rules
//! - Admin and property use cases
//!
//! ## Architecture Principles
//! - Only depends on `altolink-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits

pub mod agency;
pub mod alto;

pub use agency::ports::AgencyRepository;
pub use agency::AgencyAdminService;
pub use alto::ports::{AltoApi, TokenProvider};
pub use alto::request::{build_headers, resolve_agency_ref, AltoRequestHeaders};
pub use alto::AltoPropertyService;
