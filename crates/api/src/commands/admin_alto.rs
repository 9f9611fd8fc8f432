//! Admin routes for each agency's Alto settings
//!
//! Operators receive the AgencyRef from the partner by email and paste it
//! here, then switch production on. Every change is audited under the actor
//! named in the `X-Admin-Actor` header.

use std::sync::Arc;
use std::time::Instant;

use altolink_domain::constants::DEFAULT_ADMIN_PAGE_SIZE;
use altolink_domain::{
    AgencyAltoDetail, AgencyAltoList, AltoLinkError, AltoSettingsUpdate, AuditEntry,
};
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::ApiResult;
use crate::utils::logging::log_command_result;

/// Header naming the operator responsible for an edit.
pub const ADMIN_ACTOR_HEADER: &str = "x-admin-actor";

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

/// `GET /admin/alto-agencies`
pub async fn list_agencies(
    State(ctx): State<Arc<AppContext>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<AgencyAltoList>> {
    let Query(query) = query?;
    let start = Instant::now();
    let result = ctx
        .agencies
        .list_agencies(query.page.unwrap_or(1), query.page_size.unwrap_or(DEFAULT_ADMIN_PAGE_SIZE))
        .await;

    log_command_result("admin_alto::list_agencies", start.elapsed(), &result);
    Ok(Json(result?))
}

/// `GET /admin/alto-agencies/{id}`
pub async fn get_agency(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> ApiResult<Json<AgencyAltoDetail>> {
    let start = Instant::now();
    let result = ctx.agencies.get_agency(&id).await;

    log_command_result("admin_alto::get_agency", start.elapsed(), &result);
    Ok(Json(result?))
}

/// `PATCH /admin/alto-agencies/{id}/settings`
pub async fn update_settings(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Result<Json<AltoSettingsUpdate>, JsonRejection>,
) -> ApiResult<Json<AgencyAltoDetail>> {
    let start = Instant::now();
    let actor = admin_actor(&headers)?;
    let Json(update) = body?;
    let result = ctx.agencies.update_alto_settings(&id, update, &actor).await;

    log_command_result("admin_alto::update_settings", start.elapsed(), &result);
    Ok(Json(result?))
}

/// `GET /admin/alto-agencies/{id}/audit`
pub async fn audit_log(
    State(ctx): State<Arc<AppContext>>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<AuditEntry>>> {
    let start = Instant::now();
    let result = ctx.agencies.audit_log(&id).await;

    log_command_result("admin_alto::audit_log", start.elapsed(), &result);
    Ok(Json(result?))
}

fn admin_actor(headers: &HeaderMap) -> Result<String, AltoLinkError> {
    let value = headers
        .get(ADMIN_ACTOR_HEADER)
        .ok_or_else(|| AltoLinkError::InvalidInput("X-Admin-Actor header is required".into()))?;

    let actor = value
        .to_str()
        .map_err(|_| AltoLinkError::InvalidInput("X-Admin-Actor must be visible ASCII".into()))?
        .trim();

    if actor.is_empty() {
        return Err(AltoLinkError::InvalidInput("X-Admin-Actor header is required".into()));
    }
    Ok(actor.to_string())
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    #[test]
    fn actor_header_is_trimmed() {
        let mut headers = HeaderMap::new();
        headers.insert(ADMIN_ACTOR_HEADER, HeaderValue::from_static("  ops@agency  "));
        assert_eq!(admin_actor(&headers).unwrap(), "ops@agency");
    }

    #[test]
    fn missing_or_blank_actor_is_rejected() {
        assert!(matches!(admin_actor(&HeaderMap::new()), Err(AltoLinkError::InvalidInput(_))));

        let mut headers = HeaderMap::new();
        headers.insert(ADMIN_ACTOR_HEADER, HeaderValue::from_static("   "));
        assert!(matches!(admin_actor(&headers), Err(AltoLinkError::InvalidInput(_))));
    }
}
