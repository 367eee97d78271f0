//! Album CRUD endpoints
//!
//! Title and image have no server-side defaults; creation without them is
//! rejected rather than silently filled in.

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
use crate::db::albums::{self, Album, AlbumPatch, NewAlbum};
use crate::{ApiError, ApiResult, AppState};

/// Request payload for album creation
#[derive(Debug, Deserialize)]
pub struct CreateAlbumRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub hover_image: Option<String>,
    pub listen_url: Option<String>,
}

/// GET /api/music
pub async fn list_albums(State(state): State<AppState>) -> ApiResult<Json<Vec<Album>>> {
    let albums = albums::list_albums(&state.db).await.map_err(|e| {
        error!("Failed to fetch albums: {}", e);
        ApiError::Internal("Failed to fetch albums".to_string())
    })?;

    Ok(Json(albums))
}

/// GET /api/music/:id
pub async fn get_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Album>> {
    let guid = parse_guid(&id, "album")?;

    let album = albums::get_album(&state.db, guid)
        .await
        .map_err(|e| {
            error!("Failed to fetch album {}: {}", guid, e);
            ApiError::Internal("Failed to fetch album".to_string())
        })?
        .ok_or_else(|| ApiError::NotFound("Album not found".to_string()))?;

    Ok(Json(album))
}

/// POST /api/music
pub async fn create_album(
    State(state): State<AppState>,
    Json(payload): Json<CreateAlbumRequest>,
) -> ApiResult<(StatusCode, Json<Album>)> {
    let title = payload
        .title
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Album title is required".to_string()))?;
    let image = payload
        .image
        .filter(|i| !i.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Album image is required".to_string()))?;

    let new = NewAlbum {
        title,
        description: payload
            .description
            .unwrap_or_else(|| "Album description or release date".to_string()),
        image,
        hover_image: payload.hover_image,
        listen_url: payload.listen_url,
    };

    let album = albums::create_album(&state.db, &new).await.map_err(|e| {
        error!("Failed to create album: {}", e);
        ApiError::Internal("Failed to create album".to_string())
    })?;

    Ok((StatusCode::CREATED, Json(album)))
}

/// PUT /api/music/:id
pub async fn update_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<AlbumPatch>,
) -> ApiResult<Json<Album>> {
    let guid = parse_guid(&id, "album")?;

    let album = albums::update_album(&state.db, guid, &patch)
        .await
        .map_err(|e| {
            error!("Failed to update album {}: {}", guid, e);
            ApiError::Internal("Failed to update album".to_string())
        })?
        .ok_or_else(|| ApiError::NotFound("Album not found".to_string()))?;

    Ok(Json(album))
}

/// DELETE /api/music/:id
pub async fn delete_album(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let guid = parse_guid(&id, "album")?;

    let deleted = albums::delete_album(&state.db, guid).await.map_err(|e| {
        error!("Failed to delete album {}: {}", guid, e);
        ApiError::Internal("Failed to delete album".to_string())
    })?;

    if !deleted {
        return Err(ApiError::NotFound("Album not found".to_string()));
    }

    Ok(Json(json!({ "message": "Album deleted successfully" })))
}

/// Build album routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/music", get(list_albums).post(create_album))
        .route(
            "/api/music/:id",
            get(get_album).put(update_album).delete(delete_album),
        )
}
