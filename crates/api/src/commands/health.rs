//! Health check route for monitoring

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::context::AppContext;
use crate::utils::health::HealthStatus;

/// `GET /health`
///
/// Answers 200 when every component is healthy, 503 otherwise.
///
/// # Example Response
/// ```json
/// {
///   "is_healthy": true,
///   "score": 1.0,
///   "message": null,
///   "components": [
///     { "name": "database", "is_healthy": true, "message": null },
///     { "name": "alto_credentials", "is_healthy": true, "message": null }
///   ],
///   "timestamp": 1698765432
/// }
/// ```
pub async fn get_app_health(
    State(ctx): State<Arc<AppContext>>,
) -> (StatusCode, Json<HealthStatus>) {
    let status = ctx.health_check().await;
    let code = if status.is_healthy { StatusCode::OK } else { StatusCode::SERVICE_UNAVAILABLE };
    (code, Json(status))
}
