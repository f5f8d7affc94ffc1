//! Shelf-Scraper: a book catalogue harvester
//!
//! This crate crawls the paginated listing of a book catalogue site, loads the
//! extracted titles and prices into a SQLite table with a full-replace strategy,
//! and serves that table over a small read-only JSON API.

pub mod api;
pub mod config;
pub mod crawler;
pub mod service;
pub mod storage;

use storage::Storage;
use thiserror::Error;

/// Main error type for Shelf-Scraper operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Crawl error: {0}")]
    Crawl(#[from] crawler::CrawlError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Shelf-Scraper operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{Config, CrawlerConfig, DatabaseUrl};
pub use crawler::Crawler;
pub use service::{BookQueries, SearchOutcome};
pub use storage::{BookRecord, BookStore, NewBook};

/// Runs one complete batch job: crawl every listing page, then replace the
/// table contents with what was found
///
/// Nothing is written unless the crawl finishes without a fetch or extraction
/// failure.
///
/// # Returns
///
/// The number of rows written
pub async fn run_batch(config: &Config) -> Result<usize> {
    let fetcher =
        crawler::PageFetcher::new(&config.crawler.user_agent).map_err(crawler::CrawlError::from)?;
    let crawler = Crawler::new(fetcher, config.crawler.clone());

    tracing::info!("Starting scrape of {}", config.crawler.root_url);
    let books = crawler.run().await?;
    tracing::info!("Scrape complete, {} books found", books.len());

    let mut store = BookStore::open(&config.database)?;
    let written = store.replace_all(&books)?;
    Ok(written)
}
