//! Agency store ports and the admin use cases built on them.

pub mod ports;
pub mod service;

pub use service::AgencyAdminService;
