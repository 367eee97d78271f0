//! Hero video singleton
//!
//! Same accessor pattern as settings. Updates always replace the three
//! source columns together, so the canonical-shape invariant (hosted URL
//! xor YouTube pair) survives every write.

use encore_common::Result;
use serde::Serialize;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::youtube::{watch_url, VideoSource};

/// Default hero video shown before the admin configures one
const DEFAULT_VIDEO_ID: &str = "jNQXAC9IVRw";

/// Hero record
#[derive(Debug, Clone, Serialize)]
pub struct Hero {
    pub guid: Uuid,
    pub video_id: Option<String>,
    pub youtube_url: Option<String>,
    pub video_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

fn hero_from_row(row: &SqliteRow) -> Result<Hero> {
    let guid: String = row.get("guid");

    Ok(Hero {
        guid: Uuid::parse_str(&guid)?,
        video_id: row.get("video_id"),
        youtube_url: row.get("youtube_url"),
        video_url: row.get("video_url"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// Return the hero row, creating it with the default video on first access
pub async fn get_or_create(pool: &SqlitePool) -> Result<Hero> {
    sqlx::query(
        r#"
        INSERT INTO hero (guid, video_id, youtube_url)
        VALUES (?, ?, ?)
        ON CONFLICT(singleton) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(DEFAULT_VIDEO_ID)
    .bind(watch_url(DEFAULT_VIDEO_ID))
    .execute(pool)
    .await?;

    let row = sqlx::query("SELECT * FROM hero WHERE singleton = 1")
        .fetch_one(pool)
        .await?;

    hero_from_row(&row)
}

/// Replace the hero's video source and return the updated row
pub async fn update_source(pool: &SqlitePool, source: &VideoSource) -> Result<Hero> {
    get_or_create(pool).await?;

    let (video_id, youtube_url, video_url) = source.columns();

    sqlx::query(
        r#"
        UPDATE hero SET
            video_id = ?,
            youtube_url = ?,
            video_url = ?,
            updated_at = CURRENT_TIMESTAMP
        WHERE singleton = 1
        "#,
    )
    .bind(video_id)
    .bind(youtube_url)
    .bind(video_url)
    .execute(pool)
    .await?;

    let row = sqlx::query("SELECT * FROM hero WHERE singleton = 1")
        .fetch_one(pool)
        .await?;

    hero_from_row(&row)
}
