//! HTTP routes

pub mod admin_alto;
pub mod health;
pub mod properties;

use std::sync::Arc;

use altolink_domain::constants::ADMIN_AGENCIES_PATH;
use axum::routing::{get, patch};
use axum::Router;

use crate::context::AppContext;

/// Prefix for routes used by other internal services.
pub const INTERNAL_AGENCIES_PATH: &str = "/internal/alto/agencies";

/// Build the application router.
pub fn router(ctx: Arc<AppContext>) -> Router {
    Router::new()
        .route("/health", get(health::get_app_health))
        .route(ADMIN_AGENCIES_PATH, get(admin_alto::list_agencies))
        .route(&format!("{ADMIN_AGENCIES_PATH}/{{id}}"), get(admin_alto::get_agency))
        .route(
            &format!("{ADMIN_AGENCIES_PATH}/{{id}}/settings"),
            patch(admin_alto::update_settings),
        )
        .route(&format!("{ADMIN_AGENCIES_PATH}/{{id}}/audit"), get(admin_alto::audit_log))
        .route(
            &format!("{INTERNAL_AGENCIES_PATH}/{{id}}/properties"),
            get(properties::list_properties),
        )
        .route(
            &format!("{INTERNAL_AGENCIES_PATH}/{{id}}/properties/{{property_id}}"),
            get(properties::get_property),
        )
        .with_state(ctx)
}
