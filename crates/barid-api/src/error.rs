//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use barid_core::error::{AppError, ErrorKind};

/// Standard API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// Human-readable message.
    pub error: String,
    /// Machine-readable error code.
    pub code: String,
}

/// HTTP-facing wrapper around [`AppError`].
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl ApiError {
    /// Status code and client-visible message for this error.
    fn status_and_message(&self) -> (StatusCode, String) {
        let err = &self.0;
        match err.kind {
            ErrorKind::Validation => (StatusCode::BAD_REQUEST, err.message.clone()),
            ErrorKind::Authentication => (StatusCode::UNAUTHORIZED, err.message.clone()),
            ErrorKind::NotFound => (StatusCode::NOT_FOUND, err.message.clone()),
            ErrorKind::Conflict => (StatusCode::CONFLICT, err.message.clone()),
            ErrorKind::GenerationExhausted => {
                tracing::error!(error = %err.message, "Tracking number generation exhausted");
                (StatusCode::INTERNAL_SERVER_ERROR, err.message.clone())
            }
            ErrorKind::ServiceUnavailable => {
                tracing::error!(error = %err, "Backend unavailable");
                (StatusCode::SERVICE_UNAVAILABLE, err.message.clone())
            }
            _ => {
                tracing::error!(error = %err, source = ?err.source, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = ApiErrorResponse {
            error: message,
            code: self.0.kind.as_code().to_string(),
        };
        (status, Json(body)).into_response()
    }
}
