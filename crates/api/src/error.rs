//! Domain error to HTTP response mapping

use altolink_domain::AltoLinkError;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::utils::logging::error_label;

/// Error returned by every route handler.
#[derive(Debug)]
pub struct ApiError(pub AltoLinkError);

impl From<AltoLinkError> for ApiError {
    fn from(value: AltoLinkError) -> Self {
        Self(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AltoLinkError::InvalidInput(format!("invalid JSON body: {}", rejection.body_text())))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self(AltoLinkError::InvalidInput(format!(
            "invalid query string: {}",
            rejection.body_text()
        )))
    }
}

/// Top-level error response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Error body with machine-readable code and human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            AltoLinkError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AltoLinkError::NotFound(_) => StatusCode::NOT_FOUND,
            // Raised before anything is sent; the operator has to fix the agency.
            AltoLinkError::Config(_) => StatusCode::CONFLICT,
            AltoLinkError::Auth(_)
            | AltoLinkError::PartnerRejected(_)
            | AltoLinkError::Network(_) => StatusCode::BAD_GATEWAY,
            AltoLinkError::Database(_) | AltoLinkError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn body(&self) -> ErrorBody {
        let message = match &self.0 {
            AltoLinkError::Database(_) | AltoLinkError::Internal(_) => {
                "internal server error".to_string()
            }
            other => other.to_string(),
        };
        ErrorBody { code: error_label(&self.0).to_uppercase(), message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self.0, %status, "request failed");
        }
        (status, Json(ErrorResponse { error: self.body() })).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_category() {
        let cases = [
            (AltoLinkError::Config("x".into()), StatusCode::CONFLICT),
            (AltoLinkError::Auth("x".into()), StatusCode::BAD_GATEWAY),
            (AltoLinkError::PartnerRejected("x".into()), StatusCode::BAD_GATEWAY),
            (AltoLinkError::Network("x".into()), StatusCode::BAD_GATEWAY),
            (AltoLinkError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (AltoLinkError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (AltoLinkError::Database("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (AltoLinkError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError(err).status(), expected);
        }
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let body = ApiError(AltoLinkError::Database("disk I/O error at /var/db".into())).body();
        assert_eq!(body.code, "DATABASE");
        assert!(!body.message.contains("/var/db"));
    }

    #[test]
    fn partner_guidance_is_passed_through() {
        let body =
            ApiError(AltoLinkError::PartnerRejected("check /admin/alto-agencies".into())).body();
        assert_eq!(body.code, "PARTNER_REJECTED");
        assert!(body.message.contains("/admin/alto-agencies"));
    }
}
