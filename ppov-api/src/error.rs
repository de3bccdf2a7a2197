//! Error types for ppov-api
//!
//! Maps store, validation and analytics failures onto HTTP responses with a
//! `{"error": {"code", "message"}}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ppov_common::analytics::AnalyticsError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Malformed or out-of-range input (400)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Conflict (409) - e.g. duplicate basket item name
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Range too narrow for a trend (422)
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// Guarded division by zero (422)
    #[error("Division by zero: {0}")]
    DivisionByZero(String),

    /// CPI uplift requested without reference index values (422)
    #[error("Missing reference data: {0}")]
    MissingReferenceData(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<AnalyticsError> for ApiError {
    fn from(err: AnalyticsError) -> Self {
        match err {
            AnalyticsError::NotFound(msg) => ApiError::NotFound(msg),
            AnalyticsError::InsufficientData(msg) => ApiError::InsufficientData(msg),
            AnalyticsError::DivisionByZero(msg) => ApiError::DivisionByZero(msg),
            AnalyticsError::MissingReferenceData(msg) => ApiError::MissingReferenceData(msg),
            AnalyticsError::Validation(msg) => ApiError::Validation(msg),
        }
    }
}

impl From<ppov_common::Error> for ApiError {
    fn from(err: ppov_common::Error) -> Self {
        use ppov_common::Error;

        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::InvalidInput(msg) => ApiError::Validation(msg),
            Error::Conflict(msg) => ApiError::Conflict(msg),
            Error::Analytics(err) => err.into(),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg),
            ApiError::InsufficientData(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "INSUFFICIENT_DATA", msg)
            }
            ApiError::DivisionByZero(msg) => {
                (StatusCode::UNPROCESSABLE_ENTITY, "DIVISION_BY_ZERO", msg)
            }
            ApiError::MissingReferenceData(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "MISSING_REFERENCE_DATA",
                msg,
            ),
            ApiError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
