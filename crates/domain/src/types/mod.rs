//! Domain types and models

pub mod agency;
pub mod alto;
pub mod audit;

pub use agency::{
    normalize_agency_ref, AgencyAltoDetail, AgencyAltoList, AgencyStatus, AltoEnvironment,
    AltoSettingsUpdate, Agency,
};
pub use alto::{AltoAddress, AltoPrice, AltoProperty, PropertyFilter, PropertyListResponse};
pub use audit::{AltoSettingsChange, AuditEntry};
