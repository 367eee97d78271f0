//! Site settings singleton
//!
//! The settings table holds at most one row, guarded by the `singleton`
//! unique column. `get_or_create` is an atomic find-or-insert; `update` is
//! a shallow merge where supplied fields overwrite and absent fields are
//! untouched. The social-links map is one field: a patch that carries it
//! replaces the whole map.

use encore_common::Result;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

const DEFAULT_SITE_TITLE: &str = "Encore | Official Website";
const DEFAULT_SITE_DESCRIPTION: &str = "Official artist website";
const DEFAULT_EMAIL: &str = "contact@example.com";

/// Profile URLs for the seven supported platforms, all defaulting to ""
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub facebook: String,
    pub twitter: String,
    pub instagram: String,
    pub youtube: String,
    pub spotify: String,
    pub apple_music: String,
    pub soundcloud: String,
}

/// Settings record
#[derive(Debug, Clone, Serialize)]
pub struct Settings {
    pub guid: Uuid,
    pub site_title: String,
    pub site_description: String,
    pub email: String,
    pub social: SocialLinks,
    pub created_at: String,
    pub updated_at: String,
}

/// Partial update; absent fields are left untouched.
/// A present `social` replaces the stored map wholesale (shallow merge).
#[derive(Debug, Default, Deserialize)]
pub struct SettingsPatch {
    pub site_title: Option<String>,
    pub site_description: Option<String>,
    pub email: Option<String>,
    pub social: Option<SocialLinks>,
}

fn settings_from_row(row: &SqliteRow) -> Result<Settings> {
    let guid: String = row.get("guid");
    let social: String = row.get("social");

    Ok(Settings {
        guid: Uuid::parse_str(&guid)?,
        site_title: row.get("site_title"),
        site_description: row.get("site_description"),
        email: row.get("email"),
        social: serde_json::from_str(&social)?,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    })
}

/// Return the settings row, creating it with defaults on first access.
///
/// Safe to call repeatedly; the conflict target absorbs a racing second
/// insert, so callers always observe the same single row.
pub async fn get_or_create(pool: &SqlitePool) -> Result<Settings> {
    sqlx::query(
        r#"
        INSERT INTO settings (guid, site_title, site_description, email, social)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT(singleton) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(DEFAULT_SITE_TITLE)
    .bind(DEFAULT_SITE_DESCRIPTION)
    .bind(DEFAULT_EMAIL)
    .bind(serde_json::to_string(&SocialLinks::default())?)
    .execute(pool)
    .await?;

    let row = sqlx::query("SELECT * FROM settings WHERE singleton = 1")
        .fetch_one(pool)
        .await?;

    settings_from_row(&row)
}

/// Shallow-merge a patch onto the singleton row and return the result
pub async fn update(pool: &SqlitePool, patch: &SettingsPatch) -> Result<Settings> {
    get_or_create(pool).await?;

    let social = patch
        .social
        .as_ref()
        .map(serde_json::to_string)
        .transpose()?;

    sqlx::query(
        r#"
        UPDATE settings SET
            site_title = COALESCE(?, site_title),
            site_description = COALESCE(?, site_description),
            email = COALESCE(?, email),
            social = COALESCE(?, social),
            updated_at = CURRENT_TIMESTAMP
        WHERE singleton = 1
        "#,
    )
    .bind(&patch.site_title)
    .bind(&patch.site_description)
    .bind(&patch.email)
    .bind(&social)
    .execute(pool)
    .await?;

    let row = sqlx::query("SELECT * FROM settings WHERE singleton = 1")
        .fetch_one(pool)
        .await?;

    settings_from_row(&row)
}
