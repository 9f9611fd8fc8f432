//! HTTP client utilities

pub mod client;

pub use client::{HttpClient, RetryPolicy};
