//! encore-api library - HTTP backend for a musician's promotional website
//!
//! CRUD endpoints over the albums, videos, and tours collections, singleton
//! settings/hero/about documents, and upload pass-through to the media host.
//! The router and state are exposed so integration tests can drive the
//! service without binding a socket.

use axum::Router;
use sqlx::SqlitePool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::media::MediaHost;

pub mod api;
pub mod db;
pub mod error;
pub mod media;
pub mod youtube;

pub use error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Media host client, None when no cloud is configured
    pub media: Option<MediaHost>,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, media: Option<MediaHost>) -> Self {
        Self { db, media }
    }
}

/// Build application router
///
/// The admin frontend is served from another origin, so CORS is left
/// permissive (the API carries no cookies or credentials).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::health::routes())
        .merge(api::albums::routes())
        .merge(api::videos::routes())
        .merge(api::tours::routes())
        .merge(api::settings::routes())
        .merge(api::hero::routes())
        .merge(api::about::routes())
        .merge(api::upload::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
