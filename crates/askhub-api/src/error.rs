//! Maps domain `AppError` to HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use askhub_core::error::{AppError, ErrorKind};

/// Standard API error response body.
///
/// `status` is `"fail"` for caller mistakes (4xx) and `"error"` for
/// server faults (5xx).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    /// `"fail"` or `"error"`.
    pub status: String,
    /// Human-readable, user-safe message.
    pub message: String,
}

/// Newtype that carries an [`AppError`] across the Axum response boundary.
///
/// Handlers return `Result<_, ApiError>`; the `?` operator converts from
/// `AppError` automatically.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let status = match err.kind {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Authentication => StatusCode::UNAUTHORIZED,
            ErrorKind::Authorization => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Delivery
            | ErrorKind::Database
            | ErrorKind::Configuration
            | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Server faults keep their detail in the log, not the response.
        let message = if status.is_server_error() {
            tracing::error!(kind = %err.kind, error = %err.message, "Request failed");
            match err.kind {
                ErrorKind::Delivery => err.message,
                _ => "Something went very wrong!".to_string(),
            }
        } else {
            err.message
        };

        let body = ApiErrorResponse {
            status: if status.is_server_error() {
                "error".to_string()
            } else {
                "fail".to_string()
            },
            message,
        };

        (status, Json(body)).into_response()
    }
}
