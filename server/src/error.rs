//! HTTP error responses for the REST gateway.
//!
//! # Design
//! Every failure is a variant with its own status code. `NotFound` is only
//! produced when the RPC layer said so; an unreachable upstream is a 502 and
//! any other RPC failure is a 500, so a broken backend never looks like a
//! missing todo.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;
use todo_rpc::RpcError;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// `PUT /items/{id}` with a body whose id is absent or different.
    #[error("path id {path} does not match body id {}", display_id(.body))]
    IdMismatch { path: i64, body: Option<i64> },

    #[error("{0}")]
    NotFound(String),

    #[error("upstream unavailable: {0}")]
    BadGateway(String),

    #[error("internal error: {0}")]
    Internal(String),
}

fn display_id(id: &Option<i64>) -> String {
    id.map_or_else(|| "null".to_string(), |id| id.to_string())
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::IdMismatch { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RpcError> for ApiError {
    fn from(err: RpcError) -> Self {
        match err {
            RpcError::NotFound(message) => ApiError::NotFound(message),
            RpcError::Unavailable(_) | RpcError::Transport(_) => {
                ApiError::BadGateway(err.to_string())
            }
            RpcError::Status { .. } | RpcError::InvalidEndpoint(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(%status, error = %self, "request failed");
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
