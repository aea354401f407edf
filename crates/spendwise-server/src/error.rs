//! HTTP error mapping

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

/// Error returned by request handlers
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error(transparent)]
    Core(#[from] spendwise_core::Error),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Core(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            AppError::Core(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {}", self);
            metrics::counter!("spendwise_errors_total", "kind" => "internal").increment(1);
        } else {
            metrics::counter!("spendwise_errors_total", "kind" => "invalid_request").increment(1);
        }

        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
