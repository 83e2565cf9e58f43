//! Unified API error handling
//!
//! This module provides a consistent error response format across all API endpoints.

use actix_web::{HttpResponse, ResponseError, http::StatusCode, http::header};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::model::InvalidPromptError;

/// Standard error response format
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Bad request / invalid prompt (400)
    #[error("{0}")]
    BadRequest(String),

    /// Wrong HTTP method (405)
    #[error("Method not allowed. Use POST with JSON {{ \"prompt\": \"...\" }}")]
    MethodNotAllowed,

    /// Internal server error (500)
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn error_type(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::MethodNotAllowed => "method_not_allowed",
            ApiError::Internal(_) => "internal_error",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = self.error_type();

        if status.is_server_error() {
            tracing::error!(
                error_type = error_type,
                status = status.as_u16(),
                message = %self,
                "API error"
            );
        } else {
            tracing::info!(
                error_type = error_type,
                status = status.as_u16(),
                message = %self,
                "Rejected request"
            );
        }

        let mut response = HttpResponse::build(status);
        if matches!(self, ApiError::MethodNotAllowed) {
            response.insert_header((header::ALLOW, "POST"));
        }

        response.json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

impl From<InvalidPromptError> for ApiError {
    fn from(err: InvalidPromptError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
