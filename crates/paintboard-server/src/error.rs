use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use paintboard_core::PaintError;
use serde_json::json;
use thiserror::Error;

/// Failure of an API request.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Paint(#[from] PaintError),
    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Paint(PaintError::Encode(_) | PaintError::Io(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Paint(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        } else {
            tracing::warn!("Request rejected: {}", self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
