//! Service error taxonomy and its HTTP mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use taskdeck_proto::api::ErrorResponse;
use taskdeck_proto::task::TaskId;

/// Errors surfaced by the task service handlers.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A required field is missing or empty.
    #[error("missing required field: {0}")]
    Validation(&'static str),

    /// A mutation targeted a record that does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The underlying store failed.
    #[error("persistence failure: {0}")]
    Persistence(String),
}

impl ServiceError {
    /// HTTP status code this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}
