//! Shelf-Scraper HTTP API
//!
//! Serves the `books` table filled by the batch job.

use anyhow::Context;
use clap::Parser;
use shelf_scraper::api::{serve, AppState};
use shelf_scraper::config::load_database_url;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Read-only JSON API over the scraped book catalogue
#[derive(Parser, Debug)]
#[command(name = "shelf-api")]
#[command(version)]
#[command(about = "Read-only JSON API over the scraped book catalogue", long_about = None)]
struct Cli {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    // Fail before binding if the database location is unknown
    let database = match load_database_url() {
        Ok(url) => url,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            return Err(e).context("DATABASE_URL is missing or invalid");
        }
    };
    tracing::info!("Serving books from {}", database);

    let addr = format!("{}:{}", cli.host, cli.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    serve(listener, Arc::new(AppState::new(database))).await?;

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_scraper=info,tower_http=info,warn"),
            1 => EnvFilter::new("shelf_scraper=debug,tower_http=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
