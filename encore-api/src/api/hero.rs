//! Hero video endpoints (singleton)

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;
use tracing::error;

use crate::db::hero::{self, Hero};
use crate::youtube::{self, SourceInput};
use crate::{ApiError, ApiResult, AppState};

/// Request payload for hero updates
#[derive(Debug, Deserialize)]
pub struct UpdateHeroRequest {
    pub video_id: Option<String>,
    pub youtube_url: Option<String>,
    pub video_url: Option<String>,
}

/// GET /api/hero
///
/// First access creates the row with the default video.
pub async fn get_hero(State(state): State<AppState>) -> ApiResult<Json<Hero>> {
    let hero = hero::get_or_create(&state.db).await.map_err(|e| {
        error!("Failed to fetch hero video: {}", e);
        ApiError::Internal("Failed to fetch hero video".to_string())
    })?;

    Ok(Json(hero))
}

/// PUT /api/hero
///
/// Runs the strict normalizer: a malformed supplied ID is silently replaced
/// by one derived from the URL before the source replaces the stored one.
pub async fn update_hero(
    State(state): State<AppState>,
    Json(payload): Json<UpdateHeroRequest>,
) -> ApiResult<Json<Hero>> {
    let source = youtube::normalize_strict(&SourceInput {
        video_id: payload.video_id,
        youtube_url: payload.youtube_url,
        video_url: payload.video_url,
    })
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let hero = hero::update_source(&state.db, &source).await.map_err(|e| {
        error!("Failed to update hero video: {}", e);
        ApiError::Internal("Failed to update hero video".to_string())
    })?;

    Ok(Json(hero))
}

/// Build hero routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/api/hero", get(get_hero).put(update_hero))
}
