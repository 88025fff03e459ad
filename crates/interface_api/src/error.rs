//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use core_kernel::FieldErrors;
use domain_funding::FundingError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Validation error")]
    Validation(FieldErrors),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<FieldErrors>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::Storage(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", msg, None),
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                "One or more fields are invalid".to_string(),
                Some(errors),
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<FundingError> for ApiError {
    fn from(err: FundingError) -> Self {
        match err {
            FundingError::Validation(errors) => ApiError::Validation(errors),
            FundingError::ApplicationNotFound(id) => {
                ApiError::NotFound(format!("Application {} not found", id))
            }
            FundingError::Storage(port) => {
                error!(error = %port, "Funding store failure");
                ApiError::Storage(port.to_string())
            }
        }
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        ApiError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_kernel::ApplicationId;

    #[test]
    fn test_funding_errors_map_to_status() {
        let not_found: ApiError = FundingError::ApplicationNotFound(ApplicationId::new()).into();
        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);

        let invalid: ApiError = FundingError::Validation(FieldErrors::new().with("x", "bad")).into();
        assert_eq!(invalid.into_response().status(), StatusCode::BAD_REQUEST);

        let storage: ApiError =
            FundingError::Storage(core_kernel::PortError::connection("down")).into();
        assert_eq!(storage.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
