//! Server error types
//!
//! [`AppError`] is the error every command and query returns. It maps onto
//! the HTTP error envelope:
//!
//! | Variant        | Status | Code               |
//! |----------------|--------|--------------------|
//! | `Validation`   | 400    | `VALIDATION_ERROR` |
//! | `BadRequest`   | 400    | `BAD_REQUEST`      |
//! | `Unauthorized` | 401    | `UNAUTHORIZED`     |
//! | `NotFound`     | 404    | `NOT_FOUND`        |
//! | `Conflict`     | 409    | `CONFLICT`         |
//! | `Internal`     | 500    | `INTERNAL_ERROR`   |

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

use crate::api::response::ErrorResponse;
use crate::features::shared::validation::ValidationErrors;
use crate::store::StoreError;

/// Result type alias for server operations
pub type ServerResult<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    /// Malformed request (unparseable JSON, bad path id)
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// Details are logged, never sent to the client
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn device_not_found(id: Uuid) -> Self {
        AppError::NotFound(format!("Device '{}' not found", id))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code();

        let body = match self {
            AppError::Validation(errors) => ErrorResponse::with_details(
                code,
                "Request validation failed",
                json!({ "fields": errors.fields() }),
            ),
            AppError::Internal(ref message) => {
                tracing::error!("Internal error: {}", message);
                ErrorResponse::new(code, "An internal error occurred")
            },
            AppError::BadRequest(message)
            | AppError::Unauthorized(message)
            | AppError::NotFound(message)
            | AppError::Conflict(message) => ErrorResponse::new(code, message),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => AppError::device_not_found(id),
            StoreError::Conflict(message) => AppError::Conflict(message),
            StoreError::Corrupt(_) | StoreError::Database(_) => AppError::Internal(err.to_string()),
        }
    }
}
