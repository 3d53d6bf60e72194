use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::InitializationError;
use crate::application::services::TranscriptionServiceError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: ErrorBody {
                message: message.into(),
            },
        }),
    )
        .into_response()
}

impl IntoResponse for TranscriptionServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            TranscriptionServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            TranscriptionServiceError::ResourceExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
            TranscriptionServiceError::Provider(_) => StatusCode::BAD_GATEWAY,
            TranscriptionServiceError::Initialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        error_response(status, self.to_string())
    }
}

impl IntoResponse for InitializationError {
    fn into_response(self) -> Response {
        error_response(StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
    }
}
