//! Configuration module for Shelf-Scraper
//!
//! This module loads and validates settings from the process environment.
//! The only required value is `DATABASE_URL`; everything else has a default.
//!
//! # Example
//!
//! ```no_run
//! use shelf_scraper::config::load_config;
//!
//! let config = load_config().unwrap();
//! println!("Crawl starts at: {}", config.crawler.root_url);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, DatabaseUrl, DEFAULT_PAGE_DELAY, ROOT_URL};

// Re-export parser functions
pub use parser::{
    load_config, load_config_from, load_database_url, load_database_url_from, DATABASE_URL_VAR,
};
