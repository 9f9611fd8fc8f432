//! Shared helpers for route handlers

pub mod health;
pub mod logging;
