//! Alto (Zoopla) listing schemas.
//!
//! The partner adds fields without notice, so every top-level object keeps
//! unknown keys in `extra` instead of failing to deserialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::constants::DEFAULT_PAGE_SIZE;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AltoAddress {
    pub address_line_1: Option<String>,
    pub address_line_2: Option<String>,
    pub town: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltoPrice {
    pub amount: Option<f64>,
    #[serde(default = "default_currency")]
    pub currency_code: Option<String>,
}

fn default_currency() -> Option<String> {
    Some("GBP".to_string())
}

/// A property listing as returned by the Alto API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltoProperty {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// e.g. `available`, `sold`, `withdrawn`
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub address: Option<AltoAddress>,
    #[serde(default)]
    pub price: Option<AltoPrice>,
    #[serde(default)]
    pub bedrooms: Option<u32>,
    #[serde(default)]
    pub bathrooms: Option<u32>,
    #[serde(default)]
    pub summary_description: Option<String>,
    #[serde(default)]
    pub branch_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Page of properties from the listing endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PropertyListResponse {
    #[serde(default)]
    pub properties: Vec<AltoProperty>,
    #[serde(default)]
    pub total_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Filters accepted by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyFilter {
    #[serde(default)]
    pub branch_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

fn default_page() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

impl Default for PropertyFilter {
    fn default() -> Self {
        Self { branch_id: None, status: None, page: default_page(), page_size: default_page_size() }
    }
}
