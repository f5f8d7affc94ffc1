//! Storage module for persisting scraped books
//!
//! This module handles all database operations, including:
//! - SQLite database opening and schema creation
//! - The truncate-and-replace load used by the batch job
//! - Read queries used by the API

mod schema;
mod sqlite;
mod traits;

pub use sqlite::BookStore;
pub use traits::{Storage, StorageError, StorageResult};

use serde::Serialize;

/// A book row as stored in the `books` table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookRecord {
    pub id: i64,
    pub title: String,
    pub price: f64,
}

/// A scraped book that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub price: f64,
}
