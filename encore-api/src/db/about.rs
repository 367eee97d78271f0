//! Biography singleton

use encore_common::Result;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const DEFAULT_BIOGRAPHY: &str =
    "Artist biography has not been written yet. Edit this section from the admin panel.";
const DEFAULT_IMAGE: &str = "/images/artist.jpg";
const DEFAULT_TITLE: &str = "Biography";

/// About record
#[derive(Debug, Clone, Serialize)]
pub struct About {
    pub guid: Uuid,
    pub biography: String,
    pub image: String,
    pub title: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Default, Deserialize)]
pub struct AboutPatch {
    pub biography: Option<String>,
    pub image: Option<String>,
    pub title: Option<String>,
}

fn about_from_row(row: &SqliteRow) -> Result<About> {
    let guid: String = row.get("guid");

    Ok(About {
        guid: Uuid::parse_str(&guid)?,
        biography: row.get("biography"),
        image: row.get("image"),
        title: row.get("title"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// Return the about row, creating it with defaults on first access
pub async fn get_or_create(pool: &SqlitePool) -> Result<About> {
    sqlx::query(
        r#"
        INSERT INTO about (guid, biography, image, title)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(singleton) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(DEFAULT_BIOGRAPHY)
    .bind(DEFAULT_IMAGE)
    .bind(DEFAULT_TITLE)
    .execute(pool)
    .await?;

    let row = sqlx::query("SELECT * FROM about WHERE singleton = 1")
        .fetch_one(pool)
        .await?;

    about_from_row(&row)
}

/// Shallow-merge a patch onto the singleton row and return the result
pub async fn update(pool: &SqlitePool, patch: &AboutPatch) -> Result<About> {
    get_or_create(pool).await?;

    sqlx::query(
        r#"
        UPDATE about SET
            biography = COALESCE(?, biography),
            image = COALESCE(?, image),
            title = COALESCE(?, title),
            updated_at = CURRENT_TIMESTAMP
        WHERE singleton = 1
        "#,
    )
    .bind(&patch.biography)
    .bind(&patch.image)
    .bind(&patch.title)
    .execute(pool)
    .await?;

    let row = sqlx::query("SELECT * FROM about WHERE singleton = 1")
        .fetch_one(pool)
        .await?;

    about_from_row(&row)
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn setup_test_db() -> SqlitePool {
        let pool = SqlitePool::connect("sqlite::memory:")
            .await
            .expect("Failed to create in-memory database");
        encore_common::db::init::create_about_table(&pool).await.unwrap();
        pool
    }

    #[tokio::test]
    async fn test_first_access_creates_defaults() {
        let pool = setup_test_db().await;

        let about = get_or_create(&pool).await.unwrap();
        assert_eq!(about.title, DEFAULT_TITLE);
        assert!(!about.biography.is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_patch() {
        let pool = setup_test_db().await;

        let about = update(
            &pool,
            &AboutPatch {
                biography: Some("Singer and producer from Kigali.".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(about.biography, "Singer and producer from Kigali.");
        assert_eq!(about.image, DEFAULT_IMAGE);
        assert_eq!(about.title, DEFAULT_TITLE);
    }

    #[tokio::test]
    async fn test_two_updates_keep_single_row() {
        let pool = setup_test_db().await;

        let first = update(
            &pool,
            &AboutPatch {
                title: Some("About".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let second = update(
            &pool,
            &AboutPatch {
                image: Some("/images/press.jpg".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert_eq!(first.guid, second.guid);
        assert_eq!(second.title, "About");
        assert_eq!(second.image, "/images/press.jpg");
    }
}
