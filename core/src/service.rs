//! Todo operations on top of a `TodoStore`.
//!
//! # Design
//! The service is the only place that decides policy: a create never carries
//! a caller id, an update only touches an existing row, and delete checks
//! existence before writing. Updates go through `TodoStore::update`, which
//! checks and writes in one statement, so every caller gets the same
//! not-found behavior and a delete racing an update cannot bring a row back.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::Result;
use crate::store::TodoStore;
use crate::types::{NewTodo, TodoItem};

/// Domain service for todo items. Cheap to clone.
#[derive(Clone)]
pub struct TodoService {
    store: Arc<dyn TodoStore>,
}

impl TodoService {
    pub fn new(store: Arc<dyn TodoStore>) -> Self {
        Self { store }
    }

    pub async fn get_all_todos(&self) -> Result<Vec<TodoItem>> {
        let items = self.store.list_all().await?;
        debug!(count = items.len(), "listed todos");
        Ok(items)
    }

    /// `Ok(None)` means the id does not exist; that is not an error.
    pub async fn get_todo_by_id(&self, id: i64) -> Result<Option<TodoItem>> {
        Ok(self.store.find_by_id(id).await?)
    }

    pub async fn create_todo(&self, todo: NewTodo) -> Result<TodoItem> {
        let created = self.store.insert(&todo).await?;
        debug!(id = created.id, "created todo");
        Ok(created)
    }

    /// Overwrite title, description and completed of an existing item.
    ///
    /// Returns `Ok(None)` without writing anything when `item.id` is unknown.
    pub async fn update_todo(&self, item: TodoItem) -> Result<Option<TodoItem>> {
        let id = item.id;
        let updated = self.store.update(&item).await?;
        match &updated {
            Some(_) => debug!(id, "updated todo"),
            None => warn!(id, "update of missing todo"),
        }
        Ok(updated)
    }

    /// Returns whether a row existed (and was therefore deleted).
    pub async fn delete_todo(&self, id: i64) -> Result<bool> {
        if !self.store.exists_by_id(id).await? {
            warn!(id, "delete of missing todo");
            return Ok(false);
        }
        self.store.delete_by_id(id).await?;
        debug!(id, "deleted todo");
        Ok(true)
    }
}
