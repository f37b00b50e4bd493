use crate::{error::AppError, AppState, SERVICE_NAME};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Request body for item creation. `name` is an `Option` so that a missing
/// field and an empty field take the same validation path instead of a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// # GET /api/health
///
/// Liveness probe. Never touches the database: it must answer 200 even while
/// the database is unreachable.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "timestamp": Utc::now().to_rfc3339(),
        "version": state.version.clone(),
    }))
}

/// # GET /api/ready
///
/// Readiness probe. Issues a trivial query through the pool; any failure,
/// including pool exhaustion, reports 503 so orchestrators stop routing
/// traffic here.
pub async fn ready(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.repo.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "status": "ready",
                "database": "connected",
                "timestamp": Utc::now().to_rfc3339(),
            })),
        ),
        Err(e) => {
            tracing::error!(error = ?e, "Database connection error.");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "status": "not ready",
                    "database": "disconnected",
                    "error": e.to_string(),
                })),
            )
        }
    }
}

/// # GET /api/items
pub async fn list_items(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let items = state
        .repo
        .list_items()
        .await
        .map_err(|e| AppError::database(e, "Failed to fetch items"))?;
    let count = items.len();
    Ok(Json(json!({
        "success": true,
        "data": items,
        "count": count,
    })))
}

/// # POST /api/items
///
/// The presence check on `name` is the only application-level validation in
/// the system; it happens before any pool acquisition.
pub async fn create_item(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CreateItemRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = match body.name.as_deref() {
        Some(name) if !name.is_empty() => name,
        _ => return Err(AppError::Validation("Name is required".to_string())),
    };

    let item = state
        .repo
        .insert_item(name, body.description.as_deref())
        .await
        .map_err(|e| AppError::database(e, "Failed to create item"))?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": item })),
    ))
}

/// # GET /api/items/:id
pub async fn get_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let item = state
        .repo
        .get_item(&id)
        .await
        .map_err(|e| AppError::database(e, "Failed to fetch item"))?;
    Ok(Json(json!({ "success": true, "data": item })))
}

/// # DELETE /api/items/:id
pub async fn delete_item(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    state
        .repo
        .delete_item(&id)
        .await
        .map_err(|e| AppError::database(e, "Failed to delete item"))?;
    Ok(Json(json!({
        "success": true,
        "message": "Item deleted successfully",
    })))
}

/// Fallback for every route no handler matches.
pub async fn route_not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "success": false, "error": "Route not found" })),
    )
}
