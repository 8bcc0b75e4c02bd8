//! Error handling for the Refinery Operations Platform
//!
//! Provides consistent JSON error responses across the API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    // External service errors
    #[error("Webhook delivery failed: {0}")]
    WebhookError(String),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    /// HTTP status this error maps to
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::DuplicateEntry(_) => StatusCode::CONFLICT,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::WebhookError(_) | AppError::ExternalService(_) => StatusCode::BAD_GATEWAY,
            AppError::Configuration(_)
            | AppError::DatabaseError(_)
            | AppError::Internal(_)
            | AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn detail(&self) -> ErrorDetail {
        match self {
            AppError::Validation { field, message } => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message: message.clone(),
                field: Some(field.clone()),
            },
            AppError::ValidationError(msg) => ErrorDetail {
                code: "VALIDATION_ERROR".to_string(),
                message: msg.clone(),
                field: None,
            },
            AppError::DuplicateEntry(field) => ErrorDetail {
                code: "DUPLICATE_ENTRY".to_string(),
                message: format!("A record with this {} already exists", field),
                field: Some(field.clone()),
            },
            AppError::NotFound(resource) => ErrorDetail {
                code: "NOT_FOUND".to_string(),
                message: format!("{} not found", resource),
                field: None,
            },
            AppError::WebhookError(msg) => ErrorDetail {
                code: "WEBHOOK_ERROR".to_string(),
                message: format!("Webhook delivery failed: {}", msg),
                field: None,
            },
            AppError::ExternalService(msg) => ErrorDetail {
                code: "EXTERNAL_SERVICE_ERROR".to_string(),
                message: format!("External service error: {}", msg),
                field: None,
            },
            AppError::Configuration(msg) => ErrorDetail {
                code: "CONFIGURATION_ERROR".to_string(),
                message: format!("Configuration error: {}", msg),
                field: None,
            },
            AppError::DatabaseError(_) => ErrorDetail {
                code: "DATABASE_ERROR".to_string(),
                message: "A database error occurred".to_string(),
                field: None,
            },
            AppError::Internal(msg) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message: msg.clone(),
                field: None,
            },
            AppError::InternalError(_) => ErrorDetail {
                code: "INTERNAL_ERROR".to_string(),
                message: "An internal server error occurred".to_string(),
                field: None,
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_detail = self.detail();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
