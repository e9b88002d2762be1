//! Error handling for the Herd Manager server
//!
//! Every error leaves the server as `{ "error": { code, message, field? } }`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{RecordError, SnapshotError};
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] RecordError),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // Data source errors
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let (field, message) = first_field_error(&errors)
            .unwrap_or_else(|| ("request".to_string(), "is invalid".to_string()));
        AppError::Validation { field, message }
    }
}

/// First failing field, walking into nested structs and lists
fn first_field_error(errors: &validator::ValidationErrors) -> Option<(String, String)> {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        match kind {
            ValidationErrorsKind::Field(list) => {
                if let Some(error) = list.first() {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("failed '{}' check", error.code));
                    return Some((field.to_string(), message));
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                if let Some((inner, message)) = first_field_error(nested) {
                    return Some((format!("{}.{}", field, inner), message));
                }
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    if let Some((inner, message)) = first_field_error(nested) {
                        return Some((format!("{}[{}].{}", field, index, inner), message));
                    }
                }
            }
        }
    }
    None
}

/// Error response structure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::Validation { field, message } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::InvalidRecord(error) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorDetail {
                    code: "INVALID_RECORD".to_string(),
                    message: format!("Record '{}': {}", error.record_id, error.message),
                    field: Some(error.field.to_string()),
                },
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "BAD_REQUEST".to_string(),
                    message: msg.clone(),
                    field: None,
                },
            ),
            AppError::NotFound(resource) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: format!("{} not found", resource),
                    field: None,
                },
            ),
            AppError::Snapshot(error) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "INVALID_SNAPSHOT".to_string(),
                    message: error.to_string(),
                    field: None,
                },
            ),
            AppError::StorageError(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "STORAGE_ERROR".to_string(),
                    message: format!("Storage error: {}", msg),
                    field: None,
                },
            ),
        };

        if status.is_server_error() {
            tracing::error!("Error: {:?}", self);
        } else {
            tracing::debug!("Request rejected: {}", self);
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
