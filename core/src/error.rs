//! Error types for the store and the domain service.
//!
//! # Design
//! `NotFound` gets its own variant because `delete_by_id` on a missing row is
//! a caller bug worth telling apart from a database failure. Everything the
//! driver reports lands in `Database` untouched.

use thiserror::Error;

/// Errors returned by `TodoStore` implementations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No row with this id exists.
    #[error("todo {id} not found")]
    NotFound { id: i64 },

    /// The database driver reported a failure.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migrations could not be applied.
    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

/// Errors returned by `TodoService`.
#[derive(Debug, Error)]
pub enum TodoError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

pub type Result<T, E = TodoError> = std::result::Result<T, E>;
