//! REST gateway for the todo service.
//!
//! # Overview
//! Re-exposes the five gRPC operations as JSON resources under `/items`.
//! Every handler is a single call on a shared `TodoRpcClient`; nothing is
//! stored here.
//!
//! # Design
//! - The router state is the RPC client itself. It wraps one long-lived
//!   channel created at startup.
//! - Create always answers 200 with the created item; delete always answers
//!   200 with `{"success": bool}`.
//! - `PUT` checks the path id against the body id before calling upstream.

pub mod config;
pub mod error;

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use todo_core::{NewTodo, TodoItem};
use todo_rpc::TodoRpcClient;

pub use config::{Config, ConfigError};
pub use error::ApiError;

/// JSON body accepted by `POST /items` and `PUT /items/{id}`.
///
/// `id` is ignored on create and must equal the path id on update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoPayload {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl From<TodoPayload> for NewTodo {
    fn from(payload: TodoPayload) -> Self {
        Self {
            title: payload.title,
            description: payload.description,
            completed: payload.completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Router for `/items` without CORS.
pub fn app(client: TodoRpcClient) -> Router {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(client)
}

/// Router for `/items` that lets the browser front end at `origin` call it.
pub fn app_with_cors(client: TodoRpcClient, origin: HeaderValue) -> Router {
    app(client).layer(cors_layer(origin))
}

pub fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn list_items(State(client): State<TodoRpcClient>) -> Result<Json<Vec<TodoItem>>, ApiError> {
    Ok(Json(client.list_todos().await?))
}

async fn get_item(
    State(client): State<TodoRpcClient>,
    Path(id): Path<i64>,
) -> Result<Json<TodoItem>, ApiError> {
    Ok(Json(client.get_todo(id).await?))
}

async fn create_item(
    State(client): State<TodoRpcClient>,
    Json(payload): Json<TodoPayload>,
) -> Result<Json<TodoItem>, ApiError> {
    if let Some(ignored) = payload.id {
        debug!(id = ignored, "ignoring client-supplied id on create");
    }
    Ok(Json(client.create_todo(payload.into()).await?))
}

async fn update_item(
    State(client): State<TodoRpcClient>,
    Path(id): Path<i64>,
    Json(payload): Json<TodoPayload>,
) -> Result<Json<TodoItem>, ApiError> {
    if payload.id != Some(id) {
        return Err(ApiError::IdMismatch {
            path: id,
            body: payload.id,
        });
    }
    let item = NewTodo::from(payload).into_item(id);
    Ok(Json(client.update_todo(item).await?))
}

async fn delete_item(
    State(client): State<TodoRpcClient>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let success = client.delete_todo(id).await?;
    Ok(Json(DeleteResponse { success }))
}
