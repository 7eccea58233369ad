//! Application error type and its HTTP mapping.
//!
//! Every error leaves the service as the same JSON envelope:
//!
//! ```json
//! { "error": { "code": "rate_limited", "message": "...", "details": {} } }
//! ```
//!
//! Internal failures carry a generic message; the underlying cause is logged
//! where the error is created and never serialized.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use validator::ValidationErrors;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload, also embedded in partial results.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Malformed or missing input (400).
    #[error("{message}")]
    Validation { message: String, details: Value },

    /// Per-client quota exhausted (429).
    #[error("{message}")]
    RateLimited { message: String, details: Value },

    /// The scan target could not be reached at all (502).
    #[error("{message}")]
    UpstreamUnreachable { message: String, details: Value },

    /// The scan target answered with a non-success status, passed through as-is.
    #[error("{message}")]
    UpstreamStatus {
        status: u16,
        message: String,
        details: Value,
    },

    /// Anything unexpected (500).
    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn rate_limited(message: impl Into<String>, details: Value) -> Self {
        Self::RateLimited {
            message: message.into(),
            details,
        }
    }

    pub fn upstream_unreachable(message: impl Into<String>, details: Value) -> Self {
        Self::UpstreamUnreachable {
            message: message.into(),
            details,
        }
    }

    pub fn upstream_status(status: u16, message: impl Into<String>, details: Value) -> Self {
        Self::UpstreamStatus {
            status,
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

    /// HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            AppError::UpstreamUnreachable { .. } => StatusCode::BAD_GATEWAY,
            AppError::UpstreamStatus { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "validation_error",
            AppError::RateLimited { .. } => "rate_limited",
            AppError::UpstreamUnreachable { .. } => "upstream_unreachable",
            AppError::UpstreamStatus { .. } => "upstream_status",
            AppError::Internal { .. } => "internal_error",
        }
    }

    /// Converts the error into its serializable form without consuming it.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation { message, details }
            | AppError::RateLimited { message, details }
            | AppError::UpstreamUnreachable { message, details }
            | AppError::UpstreamStatus {
                message, details, ..
            }
            | AppError::Internal { message, details } => (message.clone(), details.clone()),
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
        let status = self.status_code();
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
            .map(|field| field.to_string())
            .collect();

        AppError::bad_request("Invalid request body", json!({ "fields": fields }))
    }
}
