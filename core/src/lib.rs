//! Domain core for the todo service.
//!
//! # Overview
//! Holds the `TodoItem` model, the `TodoStore` persistence contract with its
//! SQLite implementation, and the `TodoService` that the RPC layer calls.
//!
//! # Design
//! - The store is a trait with a handful of named operations; nothing is
//!   derived by reflection.
//! - `TodoService` owns an `Arc<dyn TodoStore>` built once at startup and is
//!   passed explicitly to whoever needs it.
//! - No in-process mutable state: everything lives in the `todos` table.

pub mod error;
pub mod service;
pub mod store;
pub mod types;

pub use error::{StoreError, TodoError};
pub use service::TodoService;
pub use store::{SqliteTodoStore, TodoStore};
pub use types::{NewTodo, TodoItem};
