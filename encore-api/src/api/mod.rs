//! HTTP API handlers for encore-api

pub mod about;
pub mod albums;
pub mod health;
pub mod hero;
pub mod settings;
pub mod tours;
pub mod upload;
pub mod videos;

use uuid::Uuid;

use crate::ApiError;

/// Validate a path identifier before any lookup. A malformed identifier is
/// a client error distinct from not-found.
pub(crate) fn parse_guid(id: &str, entity: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(id).map_err(|_| ApiError::BadRequest(format!("Invalid {} ID", entity)))
}
