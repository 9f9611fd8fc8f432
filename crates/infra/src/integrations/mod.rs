//! External service integrations

pub mod alto;
