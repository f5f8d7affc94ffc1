//! SQLite storage implementation
//!
//! This module provides a SQLite-based implementation of the Storage trait.

use crate::config::DatabaseUrl;
use crate::storage::schema::{initialize_schema, truncate_books};
use crate::storage::traits::{Storage, StorageError, StorageResult};
use crate::storage::{BookRecord, NewBook};
use rusqlite::functions::FunctionFlags;
use rusqlite::{Connection, OpenFlags, Row, ToSql, Transaction};
use std::time::Duration;

/// Rows per INSERT statement during a batch load
const INSERT_CHUNK_SIZE: usize = 100;

/// How long a reader waits on a writer's lock before giving up
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite storage backend
pub struct BookStore {
    conn: Connection,
}

impl BookStore {
    /// Opens (or creates) the database for loading
    ///
    /// # Arguments
    ///
    /// * `url` - Location of the SQLite database file
    ///
    /// # Returns
    ///
    /// * `Ok(BookStore)` - Successfully opened/created database
    /// * `Err(StorageError)` - Failed to open database
    pub fn open(url: &DatabaseUrl) -> StorageResult<Self> {
        let conn = Connection::open(url.path()).map_err(|source| StorageError::Open {
            path: url.path().display().to_string(),
            source,
        })?;

        conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        register_functions(&conn)?;

        tracing::info!("Connected to database {}", url);
        Ok(Self { conn })
    }

    /// Opens an existing database without write access
    ///
    /// Fails if the file does not exist; it is never created.
    pub fn open_read_only(url: &DatabaseUrl) -> StorageResult<Self> {
        let conn = Connection::open_with_flags(
            url.path(),
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| StorageError::Open {
            path: url.path().display().to_string(),
            source,
        })?;

        conn.busy_timeout(BUSY_TIMEOUT)?;
        register_functions(&conn)?;

        Ok(Self { conn })
    }

    /// Creates an in-memory database (for testing)
    #[cfg(test)]
    pub fn new_in_memory() -> StorageResult<Self> {
        let conn = Connection::open_in_memory()?;
        register_functions(&conn)?;
        Ok(Self { conn })
    }

    fn reset_table(&mut self) -> StorageResult<()> {
        let tx = self.conn.transaction()?;
        let result = initialize_schema(&tx).and_then(|()| truncate_books(&tx));

        match result {
            Ok(()) => {
                tx.commit()?;
                tracing::info!("Table 'books' checked/created and cleared");
                Ok(())
            }
            Err(e) => {
                tracing::warn!("Failed to reset table 'books', rolling back: {}", e);
                tx.rollback()?;
                Err(e.into())
            }
        }
    }
}

impl Storage for BookStore {
    fn replace_all(&mut self, books: &[NewBook]) -> StorageResult<usize> {
        self.reset_table()?;

        if books.is_empty() {
            tracing::info!("No data to insert");
            return Ok(0);
        }

        // A failure here leaves the table empty: the truncate above is
        // already committed.
        let tx = self.conn.transaction()?;
        match insert_books(&tx, books) {
            Ok(written) => {
                tx.commit()?;
                tracing::info!("Inserted {} books into the database", written);
                Ok(written)
            }
            Err(e) => {
                tracing::warn!("Batch insert failed, rolling back: {}", e);
                tx.rollback()?;
                Err(e.into())
            }
        }
    }

    fn list_all(&self) -> StorageResult<Vec<BookRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, title, price FROM books ORDER BY id")?;

        let books = stmt
            .query_map([], book_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(books)
    }

    fn search_by_title(&self, term: &str) -> StorageResult<Vec<BookRecord>> {
        let pattern = format!("%{}%", escape_like(&term.to_lowercase()));
        let mut stmt = self.conn.prepare(
            "SELECT id, title, price FROM books \
             WHERE unicode_lower(title) LIKE ?1 ESCAPE '\\' ORDER BY id",
        )?;

        let books = stmt
            .query_map([pattern], book_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(books)
    }

    fn count_books(&self) -> StorageResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// Registers `unicode_lower`, a full Unicode lowercase (SQLite's own
/// `lower` and `LIKE` only fold ASCII)
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "unicode_lower",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<String>(0)?.to_lowercase()),
    )
}

/// Inserts all books as multi-row INSERTs inside `tx`
fn insert_books(tx: &Transaction<'_>, books: &[NewBook]) -> rusqlite::Result<usize> {
    let mut written = 0;

    for chunk in books.chunks(INSERT_CHUNK_SIZE) {
        let placeholders = vec!["(?, ?)"; chunk.len()].join(", ");
        let sql = format!("INSERT INTO books (title, price) VALUES {}", placeholders);

        let params: Vec<&dyn ToSql> = chunk
            .iter()
            .flat_map(|book| [&book.title as &dyn ToSql, &book.price as &dyn ToSql])
            .collect();

        written += tx.execute(&sql, params.as_slice())?;
    }

    Ok(written)
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<BookRecord> {
    Ok(BookRecord {
        id: row.get(0)?,
        title: row.get(1)?,
        price: row.get(2)?,
    })
}

/// Escapes LIKE wildcards so the term matches literally
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
