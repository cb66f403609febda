//! Typed client for the todo gRPC API.
//!
//! # Design
//! `TodoRpcClient` holds one tonic `Channel`, dialled once and shared. tonic
//! clients need `&mut self` per call, so each method clones the generated
//! client; the clone shares the underlying connection. Every non-OK status is
//! turned into an `RpcError` so callers can match on what went wrong instead
//! of catching everything in one branch.

use tonic::transport::{Channel, Endpoint};

use todo_core::{NewTodo, TodoItem};

use crate::error::RpcError;
use crate::proto::todo_service_client::TodoServiceClient;
use crate::proto::{
    CreateTodoRequest, DeleteTodoRequest, GetAllTodosRequest, GetTodoRequest, UpdateTodoRequest,
};

#[derive(Debug, Clone)]
pub struct TodoRpcClient {
    inner: TodoServiceClient<Channel>,
}

impl TodoRpcClient {
    pub fn new(channel: Channel) -> Self {
        Self {
            inner: TodoServiceClient::new(channel),
        }
    }

    /// Dial `endpoint` (e.g. `http://127.0.0.1:9090`) and wait for the
    /// connection to be established.
    pub async fn connect(endpoint: &str) -> Result<Self, RpcError> {
        let channel = parse_endpoint(endpoint)?.connect().await?;
        Ok(Self::new(channel))
    }

    /// Like `connect`, but the first call does the dialling. Calls made while
    /// the server is unreachable fail with `RpcError::Unavailable`.
    pub fn connect_lazy(endpoint: &str) -> Result<Self, RpcError> {
        Ok(Self::new(parse_endpoint(endpoint)?.connect_lazy()))
    }

    pub async fn list_todos(&self) -> Result<Vec<TodoItem>, RpcError> {
        let resp = self
            .inner
            .clone()
            .get_all_todos(GetAllTodosRequest {})
            .await?;
        Ok(resp.into_inner().todos.into_iter().map(TodoItem::from).collect())
    }

    pub async fn get_todo(&self, id: i64) -> Result<TodoItem, RpcError> {
        let resp = self.inner.clone().get_todo(GetTodoRequest { id }).await?;
        Ok(resp.into_inner().into())
    }

    pub async fn create_todo(&self, todo: NewTodo) -> Result<TodoItem, RpcError> {
        let resp = self
            .inner
            .clone()
            .create_todo(CreateTodoRequest::from(todo))
            .await?;
        Ok(resp.into_inner().into())
    }

    pub async fn update_todo(&self, item: TodoItem) -> Result<TodoItem, RpcError> {
        let resp = self
            .inner
            .clone()
            .update_todo(UpdateTodoRequest::from(item))
            .await?;
        Ok(resp.into_inner().into())
    }

    /// Returns the server's `success` flag: `false` when nothing was deleted.
    pub async fn delete_todo(&self, id: i64) -> Result<bool, RpcError> {
        let resp = self
            .inner
            .clone()
            .delete_todo(DeleteTodoRequest { id })
            .await?;
        Ok(resp.into_inner().success)
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Endpoint, RpcError> {
    Endpoint::from_shared(endpoint.to_string())
        .map_err(|e| RpcError::InvalidEndpoint(format!("{endpoint}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = TodoRpcClient::connect_lazy("not a uri").unwrap_err();
        assert!(matches!(err, RpcError::InvalidEndpoint(_)));
    }

    #[tokio::test]
    async fn calls_to_unreachable_server_are_errors() {
        let client = TodoRpcClient::connect_lazy("http://127.0.0.1:1").unwrap();
        let err = client.list_todos().await.unwrap_err();
        assert!(!matches!(err, RpcError::NotFound(_)));
    }
}
