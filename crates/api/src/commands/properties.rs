//! Internal routes for Alto property lookups on behalf of an agency

use std::sync::Arc;
use std::time::Instant;

use altolink_domain::{AltoProperty, PropertyFilter, PropertyListResponse};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::ApiResult;
use crate::utils::logging::log_command_result;

#[derive(Debug, Default, Deserialize)]
pub struct PropertyQuery {
    pub branch_id: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl From<PropertyQuery> for PropertyFilter {
    fn from(query: PropertyQuery) -> Self {
        let defaults = Self::default();
        Self {
            branch_id: query.branch_id.filter(|v| !v.trim().is_empty()),
            status: query.status.filter(|v| !v.trim().is_empty()),
            page: query.page.unwrap_or(defaults.page),
            page_size: query.page_size.unwrap_or(defaults.page_size),
        }
    }
}

/// `GET /internal/alto/agencies/{id}/properties`
pub async fn list_properties(
    State(ctx): State<Arc<AppContext>>,
    Path(agency_id): Path<String>,
    query: Result<Query<PropertyQuery>, QueryRejection>,
) -> ApiResult<Json<PropertyListResponse>> {
    let Query(query) = query?;
    let start = Instant::now();
    let filter = PropertyFilter::from(query);
    let result = ctx.properties.list_properties(&agency_id, &filter).await;

    log_command_result("properties::list_properties", start.elapsed(), &result);
    Ok(Json(result?))
}

/// `GET /internal/alto/agencies/{id}/properties/{property_id}`
pub async fn get_property(
    State(ctx): State<Arc<AppContext>>,
    Path((agency_id, property_id)): Path<(String, String)>,
) -> ApiResult<Json<AltoProperty>> {
    let start = Instant::now();
    let result = ctx.properties.get_property(&agency_id, &property_id).await;

    log_command_result("properties::get_property", start.elapsed(), &result);
    Ok(Json(result?))
}
