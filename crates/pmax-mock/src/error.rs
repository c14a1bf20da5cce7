//! Mock server error responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

/// Error answered to the client, rendered as the Unisphere error body
/// `{"message": ...}`.
#[derive(Debug)]
pub enum MockError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    /// Failure injected through [`crate::InducedErrors`]. Unisphere
    /// reports induced conditions as request timeouts.
    Induced(String),
}

impl IntoResponse for MockError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            MockError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            MockError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            MockError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            MockError::Induced(msg) => (StatusCode::REQUEST_TIMEOUT, msg),
        };
        (status, Json(serde_json::json!({ "message": message }))).into_response()
    }
}

pub type MockResult<T> = Result<T, MockError>;
