//! Domain types for todo items.
//!
//! # Design
//! `TodoItem` is the persisted shape and always carries a store-assigned id.
//! `NewTodo` is the id-less shape accepted on create, so a caller-supplied id
//! has nowhere to go. Both derive serde so the transport crates can reuse them
//! for JSON bodies.

use serde::{Deserialize, Serialize};

/// A single todo item as stored in the `todos` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct TodoItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

/// Fields of a todo that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
}

impl NewTodo {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            completed: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Attach an id, producing the persisted shape.
    pub fn into_item(self, id: i64) -> TodoItem {
        TodoItem {
            id,
            title: self.title,
            description: self.description,
            completed: self.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_todo_defaults_completed_to_false() {
        let input: NewTodo = serde_json::from_str(r#"{"title":"No completed field"}"#).unwrap();
        assert_eq!(input.title, "No completed field");
        assert!(input.description.is_none());
        assert!(!input.completed);
    }

    #[test]
    fn new_todo_rejects_missing_title() {
        let result: Result<NewTodo, _> = serde_json::from_str(r#"{"completed":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn todo_item_serializes_null_description() {
        let item = NewTodo::new("Test").into_item(7);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["title"], "Test");
        assert!(json["description"].is_null());
        assert_eq!(json["completed"], false);
    }

    #[test]
    fn builder_sets_every_field() {
        let item = NewTodo::new("Buy milk")
            .with_description("2%")
            .with_completed(true)
            .into_item(1);
        assert_eq!(
            item,
            TodoItem {
                id: 1,
                title: "Buy milk".to_string(),
                description: Some("2%".to_string()),
                completed: true,
            }
        );
    }
}
