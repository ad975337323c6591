//! Error responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use wms_common::WmsError;

/// Errors a handler can return. Rendered as `{"detail": "..."}`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("No bbox available")]
    NoExtent,

    #[error("DB error: {0}")]
    Database(String),

    #[error("Proxy error: {0}")]
    Proxy(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NoExtent => StatusCode::NOT_FOUND,
            ApiError::Proxy(_) => StatusCode::BAD_GATEWAY,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<WmsError> for ApiError {
    fn from(err: WmsError) -> Self {
        match err {
            WmsError::DatabaseError(message) => ApiError::Database(message),
            WmsError::UpstreamError(message) => ApiError::Proxy(message),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Proxy(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "Request failed");
        }
        (status, Json(json!({ "detail": self.to_string() }))).into_response()
    }
}
