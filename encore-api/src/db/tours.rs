//! Tour database operations
//!
//! Dates are stored as ISO-8601 text so the ascending list sort is plain
//! lexicographic ordering.

use encore_common::Result;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

/// Tour record
#[derive(Debug, Clone, Serialize)]
pub struct Tour {
    pub guid: Uuid,
    pub title: String,
    pub location: String,
    pub date: String,
    pub description: String,
    pub ticket_url: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields for tour creation (validated at the handler layer)
#[derive(Debug, Clone)]
pub struct NewTour {
    pub title: String,
    pub location: String,
    pub date: String,
    pub description: String,
    pub ticket_url: String,
}

/// Partial update; absent fields are left untouched
#[derive(Debug, Default, Deserialize)]
pub struct TourPatch {
    pub title: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub ticket_url: Option<String>,
}

fn tour_from_row(row: &SqliteRow) -> Result<Tour> {
    let guid: String = row.get("guid");

    Ok(Tour {
        guid: Uuid::parse_str(&guid)?,
        title: row.get("title"),
        location: row.get("location"),
        date: row.get("date"),
        description: row.get("description"),
        ticket_url: row.get("ticket_url"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// List all tours, soonest first
pub async fn list_tours(pool: &SqlitePool) -> Result<Vec<Tour>> {
    let rows = sqlx::query("SELECT * FROM tours ORDER BY date ASC")
        .fetch_all(pool)
        .await?;

    rows.iter().map(tour_from_row).collect()
}

/// Load tour by guid
pub async fn get_tour(pool: &SqlitePool, guid: Uuid) -> Result<Option<Tour>> {
    let row = sqlx::query("SELECT * FROM tours WHERE guid = ?")
        .bind(guid.to_string())
        .fetch_optional(pool)
        .await?;

    row.as_ref().map(tour_from_row).transpose()
}

/// Create tour and return the stored row
pub async fn create_tour(pool: &SqlitePool, new: &NewTour) -> Result<Tour> {
    let guid = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO tours (guid, title, location, date, description, ticket_url)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(guid.to_string())
    .bind(&new.title)
    .bind(&new.location)
    .bind(&new.date)
    .bind(&new.description)
    .bind(&new.ticket_url)
    .execute(pool)
    .await?;

    let row = sqlx::query("SELECT * FROM tours WHERE guid = ?")
        .bind(guid.to_string())
        .fetch_one(pool)
        .await?;

    tour_from_row(&row)
}

/// Apply a partial update, returning the merged row or None when absent
pub async fn update_tour(
    pool: &SqlitePool,
    guid: Uuid,
    patch: &TourPatch,
) -> Result<Option<Tour>> {
    let result = sqlx::query(
        r#"
        UPDATE tours SET
            title = COALESCE(?, title),
            location = COALESCE(?, location),
            date = COALESCE(?, date),
            description = COALESCE(?, description),
            ticket_url = COALESCE(?, ticket_url),
            updated_at = CURRENT_TIMESTAMP
        WHERE guid = ?
        "#,
    )
    .bind(&patch.title)
    .bind(&patch.location)
    .bind(&patch.date)
    .bind(&patch.description)
    .bind(&patch.ticket_url)
    .bind(guid.to_string())
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_tour(pool, guid).await
}

/// Delete tour by guid; true when a row was removed
pub async fn delete_tour(pool: &SqlitePool, guid: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM tours WHERE guid = ?")
        .bind(guid.to_string())
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
