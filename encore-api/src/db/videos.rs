//! Video database operations
//!
//! Source-field consistency (hosted URL vs YouTube ID/URL) is established
//! by the normalizer before rows reach this module; updates here are plain
//! shallow merges.

use encore_common::Result;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::youtube::VideoSource;

/// Video record
#[derive(Debug, Clone, Serialize)]
pub struct Video {
    pub guid: Uuid,
    pub title: String,
    pub video_id: Option<String>,
    pub youtube_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Default, Deserialize)]
pub struct VideoPatch {
    pub title: Option<String>,
    pub video_id: Option<String>,
    pub youtube_url: Option<String>,
    pub video_url: Option<String>,
}

fn video_from_row(row: &SqliteRow) -> Result<Video> {
    let guid: String = row.get("guid");

    Ok(Video {
        guid: Uuid::parse_str(&guid)?,
        title: row.get("title"),
        video_id: row.get("video_id"),
        youtube_url: row.get("youtube_url"),
        video_url: row.get("video_url"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// List all videos, newest first
pub async fn list_videos(pool: &SqlitePool) -> Result<Vec<Video>> {
    let rows = sqlx::query("SELECT * FROM videos ORDER BY created_at DESC, rowid DESC")
        .fetch_all(pool)
        .await?;

    rows.iter().map(video_from_row).collect()
}

/// Load video by guid
pub async fn get_video(pool: &SqlitePool, guid: Uuid) -> Result<Option<Video>> {
    let row = sqlx::query("SELECT * FROM videos WHERE guid = ?")
        .bind(guid.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(video_from_row).transpose()
}

/// Create video from a normalized source and return the stored row
pub async fn create_video(
    pool: &SqlitePool,
    title: &str,
    source: &VideoSource,
) -> Result<Video> {
    let guid = Uuid::new_v4();
    let (video_id, youtube_url, video_url) = source.columns();

    sqlx::query(
        r#"
        INSERT INTO videos (guid, title, video_id, youtube_url, video_url)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(guid.to_string())
    .bind(title)
    .bind(video_id)
    .bind(youtube_url)
    .bind(video_url)
    .execute(pool)
    .await?;

    let row = sqlx::query("SELECT * FROM videos WHERE guid = ?")
        .bind(guid.to_string())
        .fetch_one(pool)
        .await?;

    video_from_row(&row)
}

/// Apply a partial update, returning the merged row or None when absent
pub async fn update_video(
    pool: &SqlitePool,
    guid: Uuid,
    patch: &VideoPatch,
) -> Result<Option<Video>> {
    let result = sqlx::query(
        r#"
        UPDATE videos SET
            title = COALESCE(?, title),
            video_id = COALESCE(?, video_id),
            youtube_url = COALESCE(?, youtube_url),
            video_url = COALESCE(?, video_url),
            updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(&patch.title)
    .bind(&patch.video_id)
    .bind(&patch.youtube_url)
    .bind(&patch.video_url)
    .bind(guid.to_string())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_video(pool, guid).await
}

/// Delete video by guid; true when a row was removed
pub async fn delete_video(pool: &SqlitePool, guid: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM videos WHERE guid = ?")
        .bind(guid.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        encore_common::db::init::create_videos_table(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_create_youtube_video() {
        let pool = setup_test_db().await;

        let source = VideoSource::YouTube {
            video_id: "ABC12345678".to_string(),
            youtube_url: "https://www.youtube.com/watch?v=ABC12345678".to_string(),
        };
        let video = create_video(&pool, "Live Session", &source).await.unwrap();

        assert_eq!(video.video_id.as_deref(), Some("ABC12345678"));
        assert!(video.video_url.is_none());
    }

    #[tokio::test]
    async fn test_create_hosted_video_has_null_youtube_fields() {
        let pool = setup_test_db().await;

        let source = VideoSource::Hosted {
            video_url: "https://cdn/x.mp4".to_string(),
        };
        let video = create_video(&pool, "Teaser", &source).await.unwrap();

        assert_eq!(video.video_url.as_deref(), Some("https://cdn/x.mp4"));
        assert!(video.video_id.is_none());
        assert!(video.youtube_url.is_none());
    }

    #[tokio::test]
    async fn test_update_patches_only_supplied_fields() {
        let pool = setup_test_db().await;
        let source = VideoSource::YouTube {
            video_id: "ABC12345678".to_string(),
            youtube_url: "https://www.youtube.com/watch?v=ABC12345678".to_string(),
        };
        let video = create_video(&pool, "Live Session", &source).await.unwrap();

        let patch = VideoPatch {
            title: Some("Acoustic Session".to_string()),
            ..Default::default()
        };
        let updated = update_video(&pool, video.guid, &patch)
            .await
            .unwrap()
            .expect("video should exist");

        assert_eq!(updated.title, "Acoustic Session");
        assert_eq!(updated.video_id.as_deref(), Some("ABC12345678"));
    }

    #[tokio::test]
    async fn test_delete_video() {
        let pool = setup_test_db().await;
        let source = VideoSource::Hosted {
            video_url: "https://cdn/x.mp4".to_string(),
        };
        let video = create_video(&pool, "Teaser", &source).await.unwrap();

        assert!(delete_video(&pool, video.guid).await.unwrap());
        assert!(get_video(&pool, video.guid).await.unwrap().is_none());
    }
}
