//! Error Types
//!
//! Layered error types with HTTP status code mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Domain-level errors raised while building domain values
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid tenant database id: {0:?}")]
    InvalidTenantId(String),
}

impl DomainError {
    /// Name of the request field the error refers to
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidTenantId(_) => "id",
        }
    }
}

/// Errors raised by the administrative database gateway
#[derive(Debug, Error)]
pub enum AdminError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Use case-level errors for application logic failures
#[derive(Debug, Error)]
pub enum UseCaseError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Admin(#[from] AdminError),
}

impl UseCaseError {
    /// Get the HTTP status code for this error
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Domain(_) => StatusCode::BAD_REQUEST,
            Self::Admin(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Domain(_) => "VALIDATION_ERROR",
            Self::Admin(_) => "INTERNAL_ERROR",
        }
    }
}

/// API error response for HTTP responses
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    UseCase(#[from] UseCaseError),
}

/// Error response body structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub request_id: Option<String>,
    pub timestamp: String,
}

/// Error detail structure
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// Field-level error for validation errors
#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            ApiError::UseCase(UseCaseError::Domain(err)) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR".to_string(),
                err.to_string(),
                Some(vec![FieldError {
                    field: err.field().to_string(),
                    message: "is invalid".to_string(),
                }]),
            ),
            ApiError::UseCase(uc_error) => {
                tracing::error!(error = %uc_error, "Request failed");
                (
                    uc_error.status_code(),
                    uc_error.error_code().to_string(),
                    INTERNAL_MESSAGE.to_string(),
                    None,
                )
            }
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code,
                message,
                details,
            },
            request_id: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::UseCase(UseCaseError::Domain(err))
    }
}
