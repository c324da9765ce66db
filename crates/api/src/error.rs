use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use folio_core::error::CoreError;
use folio_db::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent `{ "message": ..., "code": ... }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `folio_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A record store failure (read under fail-closed, or any write).
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body exceeds the configured upload limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),

    /// The request body has a content type the endpoint does not accept.
    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler and service return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id = %id, "Entity not found");
                    (
                        StatusCode::NOT_FOUND,
                        "NOT_FOUND",
                        format!("{entity} not found"),
                    )
                }
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => internal(msg),
            },

            // --- Store errors ---
            AppError::Store(err) => internal(&err.to_string()),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::PayloadTooLarge(msg) => (
                StatusCode::PAYLOAD_TOO_LARGE,
                "PAYLOAD_TOO_LARGE",
                msg.clone(),
            ),
            AppError::UnsupportedMediaType(content_type) => (
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "UNSUPPORTED_MEDIA_TYPE",
                format!(
                    "Unsupported content type '{content_type}'. \
                     Use multipart/form-data or application/json"
                ),
            ),
            AppError::InternalError(msg) => internal(msg),
        };

        let body = json!({
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl AppError {
    /// Map an axum body rejection, keeping 413 for oversized bodies.
    pub fn from_body_rejection(status: StatusCode, body_text: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            AppError::PayloadTooLarge(body_text)
        } else {
            AppError::BadRequest(body_text)
        }
    }
}

/// Log the detail and return a sanitized 500.
fn internal(detail: &str) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %detail, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
