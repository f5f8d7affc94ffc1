//! Storage traits and error types
//!
//! This module defines the trait interface for storage backends and
//! associated error types.

use crate::storage::{BookRecord, NewBook};
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("Failed to open database {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: rusqlite::Error,
    },
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for storage backend implementations
///
/// The write side is a destructive full replace; there is no per-record
/// update or delete.
pub trait Storage {
    /// Replaces the table contents with `books`
    ///
    /// Creates the table if needed, truncates it and restarts ids at 1, then
    /// inserts every book in one batch. With an empty slice the truncate
    /// still happens and nothing is inserted.
    ///
    /// # Returns
    ///
    /// The number of rows written
    fn replace_all(&mut self, books: &[NewBook]) -> StorageResult<usize>;

    /// Gets every book, in insertion order
    fn list_all(&self) -> StorageResult<Vec<BookRecord>>;

    /// Gets books whose title contains `term`, ignoring case
    fn search_by_title(&self, term: &str) -> StorageResult<Vec<BookRecord>>;

    /// Gets total book count
    fn count_books(&self) -> StorageResult<u64>;
}
