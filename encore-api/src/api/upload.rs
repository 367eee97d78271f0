//! Upload pass-through endpoints
//!
//! Each endpoint reads one multipart file field, checks it against the
//! accepted image/video types, and forwards the bytes to the media host.
//! Nothing is written to local disk.

use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use tracing::error;

use crate::media::{is_allowed_file_name, UploadKind, UploadResult};
use crate::{ApiError, ApiResult, AppState};

/// 200 MB request limit, sized for full video uploads
const MAX_UPLOAD_BYTES: usize = 200 * 1024 * 1024;

/// Pull the named file field out of a multipart body
async fn read_upload_file(
    mut multipart: Multipart,
    field_name: &str,
) -> ApiResult<(String, Vec<u8>)> {
    while let Some(field) = multipart.next_field().await.map_err(|e| {
        ApiError::BadRequest(format!("Malformed multipart body: {}", e))
    })? {
        if field.name() != Some(field_name) {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_string();
        if !is_allowed_file_name(&file_name) {
            return Err(ApiError::BadRequest(
                "Only image and video files are allowed".to_string(),
            ));
        }

        let bytes = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read upload: {}", e)))?;

        return Ok((file_name, bytes.to_vec()));
    }

    Err(ApiError::BadRequest("No file uploaded".to_string()))
}

async fn forward_upload(
    state: &AppState,
    kind: UploadKind,
    file_name: String,
    bytes: Vec<u8>,
    failure_prefix: &str,
) -> ApiResult<Json<UploadResult>> {
    let media = state
        .media
        .as_ref()
        .ok_or_else(|| ApiError::Internal("Media host is not configured".to_string()))?;

    let result = media.upload(kind, file_name, bytes).await.map_err(|e| {
        error!("Media host upload error: {}", e);
        // Upload failures are the one place the cause is passed through
        ApiError::Internal(format!("{}: {}", failure_prefix, e))
    })?;

    Ok(Json(result))
}

/// POST /api/music/upload (album cover image)
pub async fn upload_album_image(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<UploadResult>> {
    let (file_name, bytes) = read_upload_file(multipart, "image").await?;
    forward_upload(
        &state,
        UploadKind::AlbumImage,
        file_name,
        bytes,
        "Failed to upload image",
    )
    .await
}

/// POST /api/videos/upload (video file)
pub async fn upload_video_file(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<UploadResult>> {
    let (file_name, bytes) = read_upload_file(multipart, "video").await?;
    forward_upload(
        &state,
        UploadKind::Video,
        file_name,
        bytes,
        "Failed to upload video",
    )
    .await
}

/// POST /api/hero/upload (hero video file)
pub async fn upload_hero_video(
    State(state): State<AppState>,
    multipart: Multipart,
) -> ApiResult<Json<UploadResult>> {
    let (file_name, bytes) = read_upload_file(multipart, "video").await?;
    forward_upload(
        &state,
        UploadKind::HeroVideo,
        file_name,
        bytes,
        "Failed to upload video",
    )
    .await
}

/// Build upload routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/music/upload", post(upload_album_image))
        .route("/api/videos/upload", post(upload_video_file))
        .route("/api/hero/upload", post(upload_hero_video))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}
