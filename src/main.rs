//! Shelf-Scraper batch job
//!
//! Crawls the whole catalogue listing and replaces the contents of the `books`
//! table. Takes no arguments: the database location comes from `DATABASE_URL`.

use anyhow::Context;
use shelf_scraper::config::load_config;
use shelf_scraper::run_batch;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_logging();

    let config = match load_config() {
        Ok(cfg) => cfg,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e).context("DATABASE_URL is missing or invalid");
        }
    };

    match run_batch(&config).await {
        Ok(written) => {
            tracing::info!("Batch job finished, {} books stored", written);
            Ok(())
        }
        Err(e) => {
            tracing::error!("Batch job failed: {}", e);
            Err(e.into())
        }
    }
}

/// Sets up the logging/tracing subscriber, honouring `RUST_LOG` when set
fn setup_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("shelf_scraper=info,warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
