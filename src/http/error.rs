//! Mapping of handler failures to HTTP responses.
//!
//! Every error leaves the proxy as `{"error": "<message>"}`.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::upstream::UpstreamError;

/// Errors a handler can surface to the client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The primary upstream call failed.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// No route matched.
    #[error("not found")]
    NotFound,

    /// Anything else that went wrong while handling the request.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Status code sent to the client.
    ///
    /// Upstream statuses pass through verbatim; a bad id is 400; other
    /// upstream failures are 500.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Upstream(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::Upstream(e) => e.status().unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Turn a handler panic into a JSON 500 instead of a dropped connection.
pub fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "internal server error".to_string()
    };

    ApiError::Internal(message).into_response()
}
