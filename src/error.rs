//! Application error type and its HTTP mapping.
//!
//! Every failure a handler can surface is an [`AppError`]. The variant decides
//! the status code; the body always has the shape
//! `{ "error": { "code", "message", "details" } }`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

use crate::domain::repositories::StoreError;
use crate::utils::code_generator::EntropyError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Errors produced while creating or resolving short links.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing input. Maps to `400 Bad Request`.
    #[error("{message}")]
    InvalidInput { message: String, details: Value },

    /// Unknown or expired short code. Maps to `404 Not Found`.
    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// The storage backend could not complete the operation. Maps to `500`.
    #[error("{message}")]
    BackendUnavailable { message: String, details: Value },

    /// Every candidate code collided with a live entry. Maps to `500`.
    #[error("{message}")]
    GenerationExhausted { message: String, details: Value },

    /// Any other server-side failure. Maps to `500`.
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn backend_unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::BackendUnavailable {
            message: message.into(),
            details,
        }
    }

    pub fn generation_exhausted(message: impl Into<String>, details: Value) -> Self {
        Self::GenerationExhausted {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::BackendUnavailable { .. }
            | Self::GenerationExhausted { .. }
            | Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "validation_error",
            Self::NotFound { .. } => "not_found",
            Self::BackendUnavailable { .. } => "backend_unavailable",
            Self::GenerationExhausted { .. } => "generation_exhausted",
            Self::Internal { .. } => "internal_error",
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            Self::InvalidInput { message, details }
            | Self::NotFound { message, details }
            | Self::BackendUnavailable { message, details }
            | Self::GenerationExhausted { message, details }
            | Self::Internal { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), "{}", self);
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|k| k.to_string())
            .collect();
        AppError::invalid_input("Invalid URL", json!({ "fields": fields }))
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::backend_unavailable("Storage backend unavailable", json!({ "reason": e.to_string() }))
    }
}

impl From<EntropyError> for AppError {
    fn from(e: EntropyError) -> Self {
        AppError::internal(
            "Failed to generate short code",
            json!({ "reason": e.to_string() }),
        )
    }
}
