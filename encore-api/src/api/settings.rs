//! Site settings endpoints (singleton)

use axum::{extract::State, routing::get, Json, Router};
use tracing::error;

use crate::db::settings::{self, Settings, SettingsPatch};
use crate::{ApiError, ApiResult, AppState};

/// GET /api/settings
///
/// First access creates the row with defaults.
pub async fn get_settings(State(state): State<AppState>) -> ApiResult<Json<Settings>> {
    let settings = settings::get_or_create(&state.db).await.map_err(|e| {
        error!("Failed to fetch settings: {}", e);
        ApiError::Internal("Failed to fetch settings".to_string())
    })?;

    Ok(Json(settings))
}

/// PUT /api/settings
///
/// Shallow merge: supplied fields overwrite, absent fields are untouched.
pub async fn update_settings(
    State(state): State<AppState>,
    Json(patch): Json<SettingsPatch>,
) -> ApiResult<Json<Settings>> {
    let settings = settings::update(&state.db, &patch).await.map_err(|e| {
        error!("Failed to update settings: {}", e);
        ApiError::Internal("Failed to update settings".to_string())
    })?;

    Ok(Json(settings))
}

/// Build settings routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/settings", get(get_settings).put(update_settings))
}
