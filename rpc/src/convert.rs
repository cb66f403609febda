//! Mapping between protobuf messages and domain types.

use todo_core::{NewTodo, TodoItem};

use crate::proto;

impl From<TodoItem> for proto::Todo {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            completed: item.completed,
        }
    }
}

impl From<proto::Todo> for TodoItem {
    fn from(todo: proto::Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
        }
    }
}

impl From<proto::CreateTodoRequest> for NewTodo {
    fn from(req: proto::CreateTodoRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            completed: req.completed,
        }
    }
}

impl From<NewTodo> for proto::CreateTodoRequest {
    fn from(todo: NewTodo) -> Self {
        Self {
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
        }
    }
}

impl From<proto::UpdateTodoRequest> for TodoItem {
    fn from(req: proto::UpdateTodoRequest) -> Self {
        Self {
            id: req.id,
            title: req.title,
            description: req.description,
            completed: req.completed,
        }
    }
}

impl From<TodoItem> for proto::UpdateTodoRequest {
    fn from(item: TodoItem) -> Self {
        Self {
            id: item.id,
            title: item.title,
            description: item.description,
            completed: item.completed,
        }
    }
}
