//! Database implementations

pub mod agency_repository;
pub mod manager;

pub use agency_repository::SqliteAgencyRepository;
pub use manager::{DbManager, SqliteConnection, SqlitePool};
