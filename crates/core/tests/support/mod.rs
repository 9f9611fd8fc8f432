//! Shared test helpers for `altolink-core` integration tests.
//!
//! In-memory ports so the service tests can focus on behaviour instead of
//! storage and HTTP.

#![allow(dead_code)]

pub mod repositories;

use altolink_domain::Agency;

/// Agency with the given Alto settings.
pub fn agency(id: &str, agency_ref: Option<&str>, enabled: bool) -> Agency {
    Agency {
        agency_ref: agency_ref.map(str::to_string),
        alto_production_enabled: enabled,
        ..Agency::new(id, format!("Agency {id}"), id)
    }
}
