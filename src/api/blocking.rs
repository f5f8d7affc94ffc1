//! Helper for running blocking SQLite work from async handlers.

use crate::api::error::ApiError;
use crate::service::QueryError;
use axum::Json;
use serde::Serialize;
use tokio::task::spawn_blocking;

/// Runs a blocking query on the blocking pool and wraps the result in `Json`.
///
/// # Example
/// ```ignore
/// let queries = state.queries.clone();
/// blocking_json(move || queries.list_all()).await
/// ```
pub async fn blocking_json<T, F>(f: F) -> Result<Json<T>, ApiError>
where
    F: FnOnce() -> Result<T, QueryError> + Send + 'static,
    T: Send + 'static + Serialize,
{
    spawn_blocking(f)
        .await
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("blocking task failed: {e}")))?
        .map(Json)
        .map_err(ApiError::from)
}
