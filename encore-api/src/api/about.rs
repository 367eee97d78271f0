//! Biography endpoints (singleton)

use axum::{extract::State, routing::get, Json, Router};
use tracing::error;

use crate::db::about::{self, About, AboutPatch};
use crate::{ApiError, ApiResult, AppState};

/// GET /api/about
pub async fn get_about(State(state): State<AppState>) -> ApiResult<Json<About>> {
    let about = about::get_or_create(&state.db).await.map_err(|e| {
        error!("Failed to fetch about: {}", e);
        ApiError::Internal("Failed to fetch about".to_string())
    })?;

    Ok(Json(about))
}

/// PUT /api/about
pub async fn update_about(
    State(state): State<AppState>,
    Json(patch): Json<AboutPatch>,
) -> ApiResult<Json<About>> {
    let about = about::update(&state.db, &patch).await.map_err(|e| {
        error!("Failed to update about: {}", e);
        ApiError::Internal("Failed to update about".to_string())
    })?;

    Ok(Json(about))
}

/// Build about routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/about", get(get_about).put(update_about))
}
