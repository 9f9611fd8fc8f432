//! Alto partner API: ports, header rules and the property use cases.

pub mod ports;
pub mod request;
pub mod service;

pub use service::AltoPropertyService;
