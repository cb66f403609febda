//! Error type for `TodoRpcClient`.
//!
//! # Design
//! `NotFound` and `Unavailable` get dedicated variants because the HTTP
//! gateway answers them differently (404 vs 502). Every other status keeps
//! its code and message in `Status`.

use thiserror::Error;
use tonic::{Code, Status};

#[derive(Debug, Error)]
pub enum RpcError {
    /// The server answered `NOT_FOUND`.
    #[error("not found: {0}")]
    NotFound(String),

    /// The server could not be reached or dropped the call.
    #[error("rpc unavailable: {0}")]
    Unavailable(String),

    /// Any other non-OK status.
    #[error("rpc failed with {code:?}: {message}")]
    Status { code: Code, message: String },

    /// Dialling the channel failed.
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),

    /// The endpoint string is not a valid URI.
    #[error("invalid endpoint {0}")]
    InvalidEndpoint(String),
}

impl From<Status> for RpcError {
    fn from(status: Status) -> Self {
        let message = status.message().to_string();
        match status.code() {
            Code::NotFound => RpcError::NotFound(message),
            Code::Unavailable => RpcError::Unavailable(message),
            code => RpcError::Status { code, message },
        }
    }
}
