//! Video CRUD endpoints
//!
//! Creation runs the reference normalizer so stored rows always hold one of
//! the two canonical source shapes. Updates are shallow merges; a YouTube
//! URL supplied without an ID re-derives just the ID field.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use crate::api::parse_guid;
use crate::db::videos::{self, Video, VideoPatch};
use crate::youtube::{self, SourceInput};
use crate::{ApiError, ApiResult, AppState};

/// Request payload for video creation
#[derive(Debug, Deserialize)]
pub struct CreateVideoRequest {
    pub title: Option<String>,
    pub video_id: Option<String>,
    pub youtube_url: Option<String>,
    pub video_url: Option<String>,
}

/// GET /api/videos
pub async fn list_videos(State(state): State<AppState>) -> ApiResult<Json<Vec<Video>>> {
    let videos = videos::list_videos(&state.db).await.map_err(|e| {
        error!("Failed to fetch videos: {}", e);
        ApiError::Internal("Failed to fetch videos".to_string())
    })?;

    Ok(Json(videos))
}

/// GET /api/videos/:id
pub async fn get_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Video>> {
    let guid = parse_guid(&id, "video")?;

    let video = videos::get_video(&state.db, guid)
        .await
        .map_err(|e| {
            error!("Failed to fetch video {}: {}", guid, e);
            ApiError::Internal("Failed to fetch video".to_string())
        })?
        .ok_or_else(|| ApiError::NotFound("Video not found".to_string()))?;

    Ok(Json(video))
}

/// POST /api/videos
pub async fn create_video(
    State(state): State<AppState>,
    Json(payload): Json<CreateVideoRequest>,
) -> ApiResult<(StatusCode, Json<Video>)> {
    let source = youtube::normalize(&SourceInput {
        video_id: payload.video_id,
        youtube_url: payload.youtube_url,
        video_url: payload.video_url,
    })
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let title = payload
        .title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| "Video Title".to_string());

    let video = videos::create_video(&state.db, &title, &source)
        .await
        .map_err(|e| {
            error!("Failed to create video: {}", e);
            ApiError::Internal("Failed to create video".to_string())
        })?;

    Ok((StatusCode::CREATED, Json(video)))
}

/// PUT /api/videos/:id
pub async fn update_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(mut patch): Json<VideoPatch>,
) -> ApiResult<Json<Video>> {
    let guid = parse_guid(&id, "video")?;

    // URL without an ID: re-derive the ID, patching only that field. When
    // the URL matches no known shape the patch goes through unchanged.
    let id_missing = patch.video_id.as_deref().map_or(true, str::is_empty);
    if id_missing {
        if let Some(url) = patch.youtube_url.as_deref().filter(|u| !u.is_empty()) {
            if let Some(derived) = youtube::extract_video_id(url) {
                patch.video_id = Some(derived);
            }
        }
    }

    let video = videos::update_video(&state.db, guid, &patch)
        .await
        .map_err(|e| {
            error!("Failed to update video {}: {}", guid, e);
            ApiError::Internal("Failed to update video".to_string())
        })?
        .ok_or_else(|| ApiError::NotFound("Video not found".to_string()))?;

    Ok(Json(video))
}

/// DELETE /api/videos/:id
pub async fn delete_video(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let guid = parse_guid(&id, "video")?;

    let deleted = videos::delete_video(&state.db, guid).await.map_err(|e| {
        error!("Failed to delete video {}: {}", guid, e);
        ApiError::Internal("Failed to delete video".to_string())
    })?;

    if !deleted {
        return Err(ApiError::NotFound("Video not found".to_string()));
    }

    Ok(Json(json!({ "message": "Video deleted successfully" })))
}

/// Build video routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/videos", get(list_videos).post(create_video))
        .route(
            "/api/videos/:id",
            get(get_video).put(update_video).delete(delete_video),
        )
}
