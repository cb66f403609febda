//! gRPC surface for the todo service.
//!
//! # Overview
//! - `server`: `TodoGrpcService`, the tonic implementation backed by
//!   `todo_core::TodoService`, plus `serve` helpers that run it on a bound
//!   listener.
//! - `client`: `TodoRpcClient`, a typed client over one long-lived channel
//!   that turns gRPC statuses into `RpcError`.
//! - `convert`: field-by-field mapping between protobuf messages and the
//!   domain types.
//!
//! # Design
//! Message and service code is generated from `proto/todo.proto` at build
//! time. The generated types never leak past this crate's API except through
//! the `proto` module.

pub mod client;
pub mod convert;
pub mod error;
pub mod server;

pub mod proto {
    tonic::include_proto!("todo.v1");
}

pub use client::TodoRpcClient;
pub use error::RpcError;
pub use server::{serve, serve_with_shutdown, TodoGrpcService};
