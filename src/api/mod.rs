//! HTTP API over the `books` table.
//!
//! Routes:
//! - `GET /` welcome payload
//! - `GET /books` every book
//! - `GET /books/search?name=<term>` case-insensitive title search
//! - `GET /health` liveness probe

mod blocking;
pub mod error;
mod handlers;

use crate::config::DatabaseUrl;
use crate::service::BookQueries;
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use handlers::{SearchQuery, WelcomeResponse, GREETING};

/// Shared application state for all HTTP handlers.
///
/// Holds no connection: every request opens its own.
pub struct AppState {
    pub queries: BookQueries,
}

impl AppState {
    pub fn new(database: DatabaseUrl) -> Self {
        Self {
            queries: BookQueries::new(database),
        }
    }
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::welcome))
        .route("/health", get(handlers::health))
        .route("/books", get(handlers::list_books))
        .route("/books/search", get(handlers::search_books))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves the API on an already bound listener until the process stops.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Starting HTTP server on {}", addr);
    }
    axum::serve(listener, create_router(state)).await
}
