//! Typed API error for HTTP handlers.
//!
//! Converts query failures into JSON error responses: `{"error": "message"}`.

use crate::service::QueryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

/// API error with HTTP status code and human-readable message.
///
/// Both variants answer 500. `Internal` logs the real error server-side and
/// returns a static message to the client.
#[derive(Debug)]
pub enum ApiError {
    /// Store unreachable or query failed.
    Store(QueryError),
    /// Unexpected failure, such as a panicked blocking task.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match self {
            Self::Store(err) => {
                tracing::error!(error = %err, "database error");
                match err {
                    QueryError::Unavailable(_) => "could not connect to the database".to_owned(),
                    QueryError::Query(e) => format!("error querying the database: {e}"),
                }
            }
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                "internal server error".to_owned()
            }
        };
        let body = serde_json::json!({"error": message});
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl From<QueryError> for ApiError {
    fn from(err: QueryError) -> Self {
        Self::Store(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}
