//! tonic implementation of `todo.v1.TodoService`.
//!
//! # Design
//! Each RPC is a straight translation: unpack the request, call the matching
//! `TodoService` method, map the result back. Absence becomes `NOT_FOUND`;
//! a store failure becomes `INTERNAL` and is logged here, since this is the
//! last layer that still sees the underlying error.

use std::future::Future;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic::{Request, Response, Status};
use tracing::{debug, error};

use todo_core::{NewTodo, TodoError, TodoItem, TodoService};

use crate::proto::todo_service_server::{TodoService as TodoServiceRpc, TodoServiceServer};
use crate::proto::{
    CreateTodoRequest, DeleteTodoRequest, DeleteTodoResponse, GetAllTodosRequest,
    GetAllTodosResponse, GetTodoRequest, Todo, UpdateTodoRequest,
};

/// gRPC endpoint backed by a `TodoService`.
#[derive(Clone)]
pub struct TodoGrpcService {
    service: TodoService,
}

impl TodoGrpcService {
    pub fn new(service: TodoService) -> Self {
        Self { service }
    }

    /// Wrap in the generated tonic server type, ready for `add_service`.
    pub fn into_server(self) -> TodoServiceServer<Self> {
        TodoServiceServer::new(self)
    }
}

fn not_found(id: i64) -> Status {
    debug!(id, "todo not found");
    Status::not_found(format!("todo not found with id {id}"))
}

fn internal(err: TodoError) -> Status {
    error!(error = %err, "todo service failed");
    Status::internal(err.to_string())
}

#[tonic::async_trait]
impl TodoServiceRpc for TodoGrpcService {
    async fn get_all_todos(
        &self,
        _request: Request<GetAllTodosRequest>,
    ) -> Result<Response<GetAllTodosResponse>, Status> {
        let todos = self.service.get_all_todos().await.map_err(internal)?;
        Ok(Response::new(GetAllTodosResponse {
            todos: todos.into_iter().map(Todo::from).collect(),
        }))
    }

    async fn get_todo(&self, request: Request<GetTodoRequest>) -> Result<Response<Todo>, Status> {
        let id = request.into_inner().id;
        match self.service.get_todo_by_id(id).await.map_err(internal)? {
            Some(item) => Ok(Response::new(item.into())),
            None => Err(not_found(id)),
        }
    }

    async fn create_todo(
        &self,
        request: Request<CreateTodoRequest>,
    ) -> Result<Response<Todo>, Status> {
        let todo = NewTodo::from(request.into_inner());
        let created = self.service.create_todo(todo).await.map_err(internal)?;
        Ok(Response::new(created.into()))
    }

    async fn update_todo(
        &self,
        request: Request<UpdateTodoRequest>,
    ) -> Result<Response<Todo>, Status> {
        let item = TodoItem::from(request.into_inner());
        let id = item.id;
        match self.service.update_todo(item).await.map_err(internal)? {
            Some(updated) => Ok(Response::new(updated.into())),
            None => Err(not_found(id)),
        }
    }

    async fn delete_todo(
        &self,
        request: Request<DeleteTodoRequest>,
    ) -> Result<Response<DeleteTodoResponse>, Status> {
        let id = request.into_inner().id;
        let success = self.service.delete_todo(id).await.map_err(internal)?;
        Ok(Response::new(DeleteTodoResponse { success }))
    }
}

/// Serve the todo gRPC API on `listener` until the server fails.
pub async fn serve(
    listener: TcpListener,
    service: TodoService,
) -> Result<(), tonic::transport::Error> {
    Server::builder()
        .add_service(TodoGrpcService::new(service).into_server())
        .serve_with_incoming(TcpListenerStream::new(listener))
        .await
}

/// Like `serve`, but stops accepting calls once `signal` resolves.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    service: TodoService,
    signal: F,
) -> Result<(), tonic::transport::Error>
where
    F: Future<Output = ()>,
{
    Server::builder()
        .add_service(TodoGrpcService::new(service).into_server())
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), signal)
        .await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use todo_core::SqliteTodoStore;
    use tonic::Code;

    use super::*;

    async fn grpc() -> TodoGrpcService {
        let store = SqliteTodoStore::in_memory().await.unwrap();
        TodoGrpcService::new(TodoService::new(Arc::new(store)))
    }

    fn create(title: &str) -> Request<CreateTodoRequest> {
        Request::new(CreateTodoRequest {
            title: title.to_string(),
            description: Some("Description".to_string()),
            completed: false,
        })
    }

    #[tokio::test]
    async fn create_then_get() {
        let svc = grpc().await;
        let created = svc.create_todo(create("Todo 1")).await.unwrap().into_inner();
        assert!(created.id > 0);

        let fetched = svc
            .get_todo(Request::new(GetTodoRequest { id: created.id }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let status = grpc()
            .await
            .get_todo(Request::new(GetTodoRequest { id: 1 }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "todo not found with id 1");
    }

    #[tokio::test]
    async fn list_returns_every_todo() {
        let svc = grpc().await;
        svc.create_todo(create("Todo 1")).await.unwrap();
        svc.create_todo(create("Todo 2")).await.unwrap();

        let resp = svc
            .get_all_todos(Request::new(GetAllTodosRequest {}))
            .await
            .unwrap()
            .into_inner();
        let titles: Vec<_> = resp.todos.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, ["Todo 1", "Todo 2"]);
    }

    #[tokio::test]
    async fn update_overwrites_mutable_fields() {
        let svc = grpc().await;
        let created = svc.create_todo(create("Old")).await.unwrap().into_inner();

        let updated = svc
            .update_todo(Request::new(UpdateTodoRequest {
                id: created.id,
                title: "New".to_string(),
                description: None,
                completed: true,
            }))
            .await
            .unwrap()
            .into_inner();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.title, "New");
        assert!(updated.description.is_none());
        assert!(updated.completed);
    }

    #[tokio::test]
    async fn update_missing_is_not_found() {
        let status = grpc()
            .await
            .update_todo(Request::new(UpdateTodoRequest {
                id: 99,
                title: "Ghost".to_string(),
                description: None,
                completed: false,
            }))
            .await
            .unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
    }

    #[tokio::test]
    async fn delete_reports_whether_row_existed() {
        let svc = grpc().await;
        let created = svc.create_todo(create("Doomed")).await.unwrap().into_inner();

        let first = svc
            .delete_todo(Request::new(DeleteTodoRequest { id: created.id }))
            .await
            .unwrap()
            .into_inner();
        assert!(first.success);

        let second = svc
            .delete_todo(Request::new(DeleteTodoRequest { id: created.id }))
            .await
            .unwrap()
            .into_inner();
        assert!(!second.success);
    }
}
