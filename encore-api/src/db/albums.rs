//! Album database operations

use encore_common::Result;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Album record
#[derive(Debug, Clone, Serialize)]
pub struct Album {
    pub guid: Uuid,
    pub title: String,
    pub description: String,
    pub image: String,
    pub hover_image: Option<String>,
    pub listen_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields for album creation (validated at the handler layer)
#[derive(Debug, Clone)]
pub struct NewAlbum {
    pub title: String,
    pub description: String,
    pub image: String,
    pub hover_image: Option<String>,
    pub listen_url: Option<String>,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Default, Deserialize)]
pub struct AlbumPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub hover_image: Option<String>,
    pub listen_url: Option<String>,
}

fn album_from_row(row: &SqliteRow) -> Result<Album> {
    let guid: String = row.get("guid");

    Ok(Album {
        guid: Uuid::parse_str(&guid)?,
        title: row.get("title"),
        description: row.get("description"),
        image: row.get("image"),
        hover_image: row.get("hover_image"),
        listen_url: row.get("listen_url"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// List all albums, newest first
pub async fn list_albums(pool: &SqlitePool) -> Result<Vec<Album>> {
    let rows = sqlx::query("SELECT * FROM albums ORDER BY created_at DESC, rowid DESC")
        .fetch_all(pool)
        .await?;

    rows.iter().map(album_from_row).collect()
}

/// Load album by guid
pub async fn get_album(pool: &SqlitePool, guid: Uuid) -> Result<Option<Album>> {
    let row = sqlx::query("SELECT * FROM albums WHERE guid = ?")
        .bind(guid.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(album_from_row).transpose()
}

/// Create album and return the stored row
pub async fn create_album(pool: &SqlitePool, new: &NewAlbum) -> Result<Album> {
    let guid = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO albums (guid, title, description, image, hover_image, listen_url)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(guid.to_string())
    .bind(&new.title)
    .bind(&new.description)
    .bind(&new.image)
    .bind(&new.hover_image)
    .bind(&new.listen_url)
    .execute(pool)
    .await?;

    let row = sqlx::query("SELECT * FROM albums WHERE guid = ?")
        .bind(guid.to_string())
        .fetch_one(pool)
        .await?;

    album_from_row(&row)
}

/// Apply a partial update, returning the merged row or None when absent
pub async fn update_album(
    pool: &SqlitePool,
    guid: Uuid,
    patch: &AlbumPatch,
) -> Result<Option<Album>> {
    let result = sqlx::query(
        r#"
        UPDATE albums SET
            title = COALESCE(?, title),
            description = COALESCE(?, description),
            image = COALESCE(?, image),
            hover_image = COALESCE(?, hover_image),
            listen_url = COALESCE(?, listen_url),
            updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(&patch.title)
    .bind(&patch.description)
    .bind(&patch.image)
    .bind(&patch.hover_image)
    .bind(&patch.listen_url)
    .bind(guid.to_string())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_album(pool, guid).await
}

/// Delete album by guid; true when a row was removed
pub async fn delete_album(pool: &SqlitePool, guid: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM albums WHERE guid = ?")
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
        encore_common::db::init::create_albums_table(&pool).await.unwrap();
        pool
    }

    fn new_album(title: &str) -> NewAlbum {
        NewAlbum {
            title: title.to_string(),
            description: "Album description or release date".to_string(),
            image: "/images/album-cover.jpg".to_string(),
            hover_image: None,
            listen_url: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_album() {
        let pool = setup_test_db().await;

        let created = create_album(&pool, &new_album("First Light")).await.unwrap();
        assert_eq!(created.title, "First Light");
        assert!(!created.created_at.is_empty());

        let loaded = get_album(&pool, created.guid)
            .await
            .unwrap()
            .expect("album should exist");
        assert_eq!(loaded.guid, created.guid);
        assert_eq!(loaded.image, "/images/album-cover.jpg");
    }

    #[tokio::test]
    async fn test_get_unknown_album_is_none() {
        let pool = setup_test_db().await;

        let loaded = get_album(&pool, Uuid::new_v4()).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_update_merges_only_supplied_fields() {
        let pool = setup_test_db().await;
        let created = create_album(&pool, &new_album("First Light")).await.unwrap();

        let patch = AlbumPatch {
            description: Some("Remastered".to_string()),
            ..Default::default()
        };
        let updated = update_album(&pool, created.guid, &patch)
            .await
            .unwrap()
            .expect("album should exist");

        assert_eq!(updated.title, "First Light");
        assert_eq!(updated.description, "Remastered");
        assert_eq!(updated.image, created.image);
    }

    #[tokio::test]
    async fn test_update_unknown_album_is_none() {
        let pool = setup_test_db().await;

        let patch = AlbumPatch {
            title: Some("x".to_string()),
            ..Default::default()
        };
        let updated = update_album(&pool, Uuid::new_v4(), &patch).await.unwrap();
        assert!(updated.is_none());
    }

    #[tokio::test]
    async fn test_delete_album() {
        let pool = setup_test_db().await;
        let created = create_album(&pool, &new_album("First Light")).await.unwrap();

        assert!(delete_album(&pool, created.guid).await.unwrap());
        assert!(!delete_album(&pool, created.guid).await.unwrap());
        assert!(get_album(&pool, created.guid).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_albums_newest_first() {
        let pool = setup_test_db().await;
        create_album(&pool, &new_album("First")).await.unwrap();
        create_album(&pool, &new_album("Second")).await.unwrap();

        let albums = list_albums(&pool).await.unwrap();
        assert_eq!(albums.len(), 2);
        assert_eq!(albums[0].title, "Second");
        assert_eq!(albums[1].title, "First");
    }
}
