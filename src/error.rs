use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::upstream::UpstreamError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Method Not Allowed. Use POST.")]
    MethodNotAllowed,

    #[error("Missing required fields.")]
    MissingFields,

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error("Model did not return valid JSON.")]
    InvalidModelOutput,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::MissingFields => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Client errors carry their message as `error`. Everything else is logged
/// and reported as a generic internal error with the cause in `details`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = if status.is_client_error() {
            json!({ "error": self.to_string() })
        } else {
            tracing::error!(error = ?self, "Plan generation failed");
            json!({ "error": "Internal error", "details": self.to_string() })
        };

        (status, Json(body)).into_response()
    }
}
