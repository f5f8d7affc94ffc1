//! Database schema definitions
//!
//! This module contains the SQL for the single `books` table.

/// SQL schema for the database
pub const SCHEMA_SQL: &str = r#"
-- One row per product card of the most recent load
CREATE TABLE IF NOT EXISTS books (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    price REAL NOT NULL
);
"#;

/// Empties the table and restarts ids from 1
///
/// `sqlite_sequence` exists as soon as any AUTOINCREMENT table does.
pub const TRUNCATE_SQL: &str = r#"
DELETE FROM books;
DELETE FROM sqlite_sequence WHERE name = 'books';
"#;

/// Initializes the database schema
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Returns
///
/// * `Ok(())` - Schema initialized successfully
/// * `Err(rusqlite::Error)` - Failed to initialize schema
pub fn initialize_schema(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)?;
    Ok(())
}

/// Truncates the `books` table with an identity reset
pub fn truncate_books(conn: &rusqlite::Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(TRUNCATE_SQL)?;
    Ok(())
}
