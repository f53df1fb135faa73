use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::payload::PayloadError;

/// Error surfaced to HTTP callers as `{"error": "<message>"}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        let message = msg.into();
        log::warn!("Bad request: {}", message);
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        let message = msg.into();
        log::error!("Internal error: {}", message);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message,
        }
    }
}

impl From<PayloadError> for ApiError {
    fn from(err: PayloadError) -> Self {
        ApiError::bad_request(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: &self.message,
        });
        (self.status, body).into_response()
    }
}
