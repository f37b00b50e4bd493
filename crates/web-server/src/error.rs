use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use database::DbError;
use http_body_util::Full;
use serde_json::json;
use std::any::Any;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("{public}")]
    Database {
        #[source]
        source: DbError,
        public: &'static str,
    },
}

impl AppError {
    /// The single translation point from `DbError` to an HTTP-facing error.
    ///
    /// A missing row becomes 404; everything else (pool timeouts, cast
    /// failures, connection errors) carries the fixed `public` message and
    /// maps to 500, so no database detail ever reaches a client.
    pub fn database(source: DbError, public: &'static str) -> Self {
        match source {
            DbError::NotFound => AppError::NotFound("Item not found".to_string()),
            source => AppError::Database { source, public },
        }
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            AppError::Database { source, public } => {
                tracing::error!(error = ?source, "Database error.");
                (StatusCode::INTERNAL_SERVER_ERROR, public.to_string())
            }
        };

        let body = Json(json!({ "success": false, "error": error_message }));
        (status, body).into_response()
    }
}

/// Maps a handler panic to a generic 500 envelope.
///
/// The panic payload is logged server-side only; clients get the same fixed
/// message regardless of what went wrong.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> axum::http::Response<Full<Bytes>> {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(panic = %detail, "Unhandled error while serving request.");

    let body = json!({ "success": false, "error": "Internal server error" }).to_string();
    axum::http::Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::from(body))
        .expect("fixed 500 response must build")
}
