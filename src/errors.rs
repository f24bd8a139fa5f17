//! Centralized error handling.
//!
//! Provides a unified error type for the entire application,
//! with automatic HTTP response conversion.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::domain::{UserId, ValidationErrors};

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Client errors
    #[error("{0}")]
    Validation(ValidationErrors),

    #[error("User must be at least {required} years old.")]
    IneligibleAge { required: u32 },

    #[error("From date must be before To date.")]
    InvalidRange,

    // Resource errors
    #[error("User not found with ID: {0}")]
    NotFound(UserId),

    // External service errors
    #[error("{0}")]
    Database(#[from] sea_orm::DbErr),

    // Internal
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::IneligibleAge { .. } | AppError::InvalidRange => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code for logs
    fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::IneligibleAge { .. } => "INELIGIBLE_AGE",
            AppError::InvalidRange => "INVALID_RANGE",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Database(_) => "DATABASE_ERROR",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            // Validation failures are a JSON list of messages
            AppError::Validation(errors) => (status, Json(errors)).into_response(),
            other => {
                if status.is_server_error() {
                    tracing::error!(code = other.code(), "{:?}", other);
                } else {
                    tracing::debug!(code = other.code(), "{}", other);
                }
                (status, other.to_string()).into_response()
            }
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(ValidationErrors::single(msg))
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(errors)
    }
}

/// Unreadable JSON bodies are reported like validation failures
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::validation(rejection.body_text())
    }
}
