//! Read-only query service over the `books` table
//!
//! Every operation opens its own read-only connection and drops it before
//! returning, on success and on error alike. There is no pooling.

use crate::config::DatabaseUrl;
use crate::storage::{BookRecord, BookStore, Storage, StorageError};
use serde::Serialize;
use thiserror::Error;

/// Errors surfaced by the query service
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Could not connect to the database: {0}")]
    Unavailable(#[source] StorageError),

    #[error("Database query failed: {0}")]
    Query(#[source] StorageError),
}

/// Outcome of a title search
///
/// Serializes as the matching rows, or as `{"message": "no results"}` when
/// nothing matched.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SearchOutcome {
    Matches(Vec<BookRecord>),
    NoResults { message: &'static str },
}

impl SearchOutcome {
    pub const NO_RESULTS_MESSAGE: &'static str = "no results";

    fn from_rows(rows: Vec<BookRecord>) -> Self {
        if rows.is_empty() {
            Self::NoResults {
                message: Self::NO_RESULTS_MESSAGE,
            }
        } else {
            Self::Matches(rows)
        }
    }
}

/// Query entry points used by the HTTP API
#[derive(Debug, Clone)]
pub struct BookQueries {
    database: DatabaseUrl,
}

impl BookQueries {
    pub fn new(database: DatabaseUrl) -> Self {
        Self { database }
    }

    /// Gets every stored book, in insertion order
    pub fn list_all(&self) -> Result<Vec<BookRecord>, QueryError> {
        let store = self.connect()?;
        store.list_all().map_err(QueryError::Query)
    }

    /// Finds books whose title contains `term`, ignoring case
    pub fn search_by_title(&self, term: &str) -> Result<SearchOutcome, QueryError> {
        let store = self.connect()?;
        let rows = store.search_by_title(term).map_err(QueryError::Query)?;
        Ok(SearchOutcome::from_rows(rows))
    }

    fn connect(&self) -> Result<BookStore, QueryError> {
        BookStore::open_read_only(&self.database).map_err(|e| {
            tracing::error!("Could not connect to database {}: {}", self.database, e);
            QueryError::Unavailable(e)
        })
    }
}
