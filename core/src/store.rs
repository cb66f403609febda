//! Record store for todo items.
//!
//! # Design
//! `TodoStore` is the small set of named operations the service needs from
//! persistence. The generic "save" of a repository is split in two:
//! `insert` for rows without an id and `save` for rows that carry one. `save`
//! keeps the generic overwrite-or-create behavior. `update` only ever touches
//! an existing row, checking for it and writing it in the same statement.
//!
//! `SqliteTodoStore` is the only implementation. It owns a `SqlitePool` that
//! is created once at startup and cloned into whoever needs it.

use std::str::FromStr;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreError;
use crate::types::{NewTodo, TodoItem};

/// Embedded migrations for the `todos` table.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Persistence operations over the `todos` table.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// Every stored item, in store iteration order.
    async fn list_all(&self) -> Result<Vec<TodoItem>, StoreError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<TodoItem>, StoreError>;

    /// Insert a new row and return it with its assigned id.
    async fn insert(&self, todo: &NewTodo) -> Result<TodoItem, StoreError>;

    /// Overwrite the row with `item.id`, creating it if it does not exist.
    async fn save(&self, item: &TodoItem) -> Result<TodoItem, StoreError>;

    /// Overwrite the row with `item.id` if it exists. `Ok(None)` when it does
    /// not; no row is ever created.
    async fn update(&self, item: &TodoItem) -> Result<Option<TodoItem>, StoreError>;

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError>;

    /// Delete the row with `id`. Fails with `StoreError::NotFound` if there
    /// was nothing to delete.
    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError>;
}

/// SQLite-backed `TodoStore`.
#[derive(Debug, Clone)]
pub struct SqliteTodoStore {
    pool: SqlitePool,
}

impl SqliteTodoStore {
    /// Wrap an existing pool. Migrations are not run.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `url` and apply migrations.
    pub async fn connect(url: &str) -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        MIGRATOR.run(&pool).await?;
        debug!(url, "sqlite store ready");
        Ok(Self { pool })
    }

    /// Private in-memory database. Everything is lost when the store drops.
    ///
    /// Each SQLite connection to `:memory:` sees its own database, so the pool
    /// is pinned to one connection that never expires.
    pub async fn in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?;
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;
        MIGRATOR.run(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl TodoStore for SqliteTodoStore {
    async fn list_all(&self) -> Result<Vec<TodoItem>, StoreError> {
        let items = sqlx::query_as::<_, TodoItem>(
            "SELECT id, title, description, completed FROM todos ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TodoItem>, StoreError> {
        let item = sqlx::query_as::<_, TodoItem>(
            "SELECT id, title, description, completed FROM todos WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(item)
    }

    async fn insert(&self, todo: &NewTodo) -> Result<TodoItem, StoreError> {
        let item = sqlx::query_as::<_, TodoItem>(
            r#"
            INSERT INTO todos (title, description, completed)
            VALUES (?, ?, ?)
            RETURNING id, title, description, completed
            "#,
        )
        .bind(&todo.title)
        .bind(todo.description.as_deref())
        .bind(todo.completed)
        .fetch_one(&self.pool)
        .await?;
        debug!(id = item.id, "inserted todo");
        Ok(item)
    }

    async fn save(&self, item: &TodoItem) -> Result<TodoItem, StoreError> {
        let saved = sqlx::query_as::<_, TodoItem>(
            r#"
            INSERT INTO todos (id, title, description, completed)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                completed = excluded.completed
            RETURNING id, title, description, completed
            "#,
        )
        .bind(item.id)
        .bind(&item.title)
        .bind(item.description.as_deref())
        .bind(item.completed)
        .fetch_one(&self.pool)
        .await?;
        debug!(id = saved.id, "saved todo");
        Ok(saved)
    }

    async fn update(&self, item: &TodoItem) -> Result<Option<TodoItem>, StoreError> {
        let updated = sqlx::query_as::<_, TodoItem>(
            r#"
            UPDATE todos
            SET title = ?, description = ?, completed = ?
            WHERE id = ?
            RETURNING id, title, description, completed
            "#,
        )
        .bind(&item.title)
        .bind(item.description.as_deref())
        .bind(item.completed)
        .bind(item.id)
        .fetch_optional(&self.pool)
        .await?;
        debug!(id = item.id, found = updated.is_some(), "updated todo");
        Ok(updated)
    }

    async fn exists_by_id(&self, id: i64) -> Result<bool, StoreError> {
        let found: i64 = sqlx::query_scalar("SELECT COUNT(1) FROM todos WHERE id = ?")
            .bind(id)
            .fetch_one(&self.pool)
            .await?;
        Ok(found > 0)
    }

    async fn delete_by_id(&self, id: i64) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { id });
        }
        debug!(id, "deleted todo");
        Ok(())
    }
}
