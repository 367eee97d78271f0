//! Tour CRUD endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::error;

use crate::api::parse_guid;
use crate::db::tours::{self, NewTour, Tour, TourPatch};
use crate::{ApiError, ApiResult, AppState};

/// Request payload for tour creation
#[derive(Debug, Deserialize)]
pub struct CreateTourRequest {
    pub title: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub ticket_url: Option<String>,
}

/// Dates are accepted as `YYYY-MM-DD` or full RFC 3339 timestamps
fn validate_date(date: &str) -> Result<(), ApiError> {
    let ok = NaiveDate::parse_from_str(date, "%Y-%m-%d").is_ok()
        || chrono::DateTime::parse_from_rfc3339(date).is_ok();
    if ok {
        Ok(())
    } else {
        Err(ApiError::BadRequest("Invalid tour date".to_string()))
    }
}

/// GET /api/tours
pub async fn list_tours(State(state): State<AppState>) -> ApiResult<Json<Vec<Tour>>> {
    let tours = tours::list_tours(&state.db).await.map_err(|e| {
        error!("Failed to fetch tours: {}", e);
        ApiError::Internal("Failed to fetch tours".to_string())
    })?;

    Ok(Json(tours))
}

/// GET /api/tours/:id
pub async fn get_tour(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Tour>> {
    let guid = parse_guid(&id, "tour")?;

    let tour = tours::get_tour(&state.db, guid)
        .await
        .map_err(|e| {
            error!("Failed to fetch tour {}: {}", guid, e);
            ApiError::Internal("Failed to fetch tour".to_string())
        })?
        .ok_or_else(|| ApiError::NotFound("Tour not found".to_string()))?;

    Ok(Json(tour))
}

/// POST /api/tours
pub async fn create_tour(
    State(state): State<AppState>,
    Json(payload): Json<CreateTourRequest>,
) -> ApiResult<(StatusCode, Json<Tour>)> {
    let title = payload
        .title
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Tour title is required".to_string()))?;
    let location = payload
        .location
        .filter(|l| !l.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Tour location is required".to_string()))?;
    let date = payload
        .date
        .filter(|d| !d.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Tour date is required".to_string()))?;
    validate_date(&date)?;

    let new = NewTour {
        title,
        location,
        date,
        description: payload.description.unwrap_or_default(),
        ticket_url: payload.ticket_url.unwrap_or_else(|| "#".to_string()),
    };

    let tour = tours::create_tour(&state.db, &new).await.map_err(|e| {
        error!("Failed to create tour: {}", e);
        ApiError::Internal("Failed to create tour".to_string())
    })?;

    Ok((StatusCode::CREATED, Json(tour)))
}

/// PUT /api/tours/:id
pub async fn update_tour(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TourPatch>,
) -> ApiResult<Json<Tour>> {
    let guid = parse_guid(&id, "tour")?;

    if let Some(date) = patch.date.as_deref() {
        validate_date(date)?;
    }

    let tour = tours::update_tour(&state.db, guid, &patch)
        .await
        .map_err(|e| {
            error!("Failed to update tour {}: {}", guid, e);
            ApiError::Internal("Failed to update tour".to_string())
        })?
        .ok_or_else(|| ApiError::NotFound("Tour not found".to_string()))?;

    Ok(Json(tour))
}

/// DELETE /api/tours/:id
pub async fn delete_tour(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let guid = parse_guid(&id, "tour")?;

    let deleted = tours::delete_tour(&state.db, guid).await.map_err(|e| {
        error!("Failed to delete tour {}: {}", guid, e);
        ApiError::Internal("Failed to delete tour".to_string())
    })?;

    if !deleted {
        return Err(ApiError::NotFound("Tour not found".to_string()));
    }

    Ok(Json(json!({ "message": "Tour deleted successfully" })))
}

/// Build tour routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/tours", get(list_tours).post(create_tour))
        .route(
            "/api/tours/:id",
            get(get_tour).put(update_tour).delete(delete_tour),
        )
}
