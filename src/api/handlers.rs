use crate::api::blocking::blocking_json;
use crate::api::error::ApiError;
use crate::api::AppState;
use crate::service::SearchOutcome;
use crate::storage::BookRecord;
use axum::extract::{Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const GREETING: &str =
    "Welcome to the books API. Browse /books or search /books/search?name=...";

#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    pub greeting: &'static str,
}

/// Query string of `/books/search`; `name` is required.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    pub name: String,
}

pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse { greeting: GREETING })
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn list_books(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<BookRecord>>, ApiError> {
    let queries = state.queries.clone();
    blocking_json(move || queries.list_all()).await
}

pub async fn search_books(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<SearchOutcome>, ApiError> {
    tracing::debug!("Searching books by title: {}", query.name);
    let queries = state.queries.clone();
    blocking_json(move || queries.search_by_title(&query.name)).await
}
