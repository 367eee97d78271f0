//! Integration tests for the singleton endpoints (settings, hero, about)
//!
//! Covers implicit creation on first read, shallow-merge updates, and the
//! strict reference normalization on hero updates.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;
use tower::util::ServiceExt; // for `oneshot` method

use encore_api::{build_router, AppState};

async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Should create in-memory database");

    encore_common::db::init::create_tables(&pool)
        .await
        .expect("Should create tables");

    pool
}

fn setup_app(db: SqlitePool) -> axum::Router {
    build_router(AppState::new(db, None))
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn put_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("PUT")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

// =============================================================================
// Settings
// =============================================================================

#[tokio::test]
async fn test_settings_first_read_creates_defaults() {
    let app = setup_app(setup_test_db().await);

    let response = app.clone().oneshot(get_request("/api/settings")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let first = extract_json(response.into_body()).await;
    assert!(first["site_title"].as_str().unwrap().len() > 0);
    assert_eq!(first["social"]["facebook"], "");

    // Second read returns the same document
    let response = app.oneshot(get_request("/api/settings")).await.unwrap();
    let second = extract_json(response.into_body()).await;
    assert_eq!(first["guid"], second["guid"]);
}

#[tokio::test]
async fn test_settings_update_is_shallow_merge() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .clone()
        .oneshot(put_request(
            "/api/settings",
            json!({"site_title": "Night Tide"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(put_request(
            "/api/settings",
            json!({"email": "booking@example.com"}),
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;

    // Earlier patch survives a later disjoint patch
    assert_eq!(body["site_title"], "Night Tide");
    assert_eq!(body["email"], "booking@example.com");
}

#[tokio::test]
async fn test_settings_social_map_is_replaced_as_one_field() {
    let app = setup_app(setup_test_db().await);

    app.clone()
        .oneshot(put_request(
            "/api/settings",
            json!({"social": {"facebook": "https://facebook.com/artist"}}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(put_request(
            "/api/settings",
            json!({"social": {"spotify": "https://open.spotify.com/artist/x"}}),
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;

    assert_eq!(body["social"]["spotify"], "https://open.spotify.com/artist/x");
    assert_eq!(body["social"]["facebook"], "");
}

// =============================================================================
// Hero
// =============================================================================

#[tokio::test]
async fn test_hero_first_read_creates_default_video() {
    let app = setup_app(setup_test_db().await);

    let response = app.clone().oneshot(get_request("/api/hero")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let first = extract_json(response.into_body()).await;
    assert!(first["video_id"].is_string());
    assert!(first["video_url"].is_null());

    let response = app.oneshot(get_request("/api/hero")).await.unwrap();
    let second = extract_json(response.into_body()).await;
    assert_eq!(first["guid"], second["guid"]);
}

#[tokio::test]
async fn test_hero_update_with_url_derives_id() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .oneshot(put_request(
            "/api/hero",
            json!({"youtube_url": "https://www.youtube.com/embed/ABC12345678"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["video_id"], "ABC12345678");
}

#[tokio::test]
async fn test_hero_update_invalid_id_is_replaced_by_derived_one() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .oneshot(put_request(
            "/api/hero",
            json!({
                "video_id": "short",
                "youtube_url": "https://youtu.be/XYZ98765432"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["video_id"], "XYZ98765432");
}

#[tokio::test]
async fn test_hero_update_hosted_clears_youtube_fields() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .oneshot(put_request(
            "/api/hero",
            json!({"video_url": "https://cdn/hero.mp4"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["video_url"], "https://cdn/hero.mp4");
    assert!(body["video_id"].is_null());
    assert!(body["youtube_url"].is_null());
}

#[tokio::test]
async fn test_hero_update_without_source_is_rejected() {
    let app = setup_app(setup_test_db().await);

    let response = app
        .oneshot(put_request("/api/hero", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["error"], "Video ID or video file is required");
}

// =============================================================================
// About
// =============================================================================

#[tokio::test]
async fn test_about_first_read_creates_defaults() {
    let app = setup_app(setup_test_db().await);

    let response = app.oneshot(get_request("/api/about")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = extract_json(response.into_body()).await;
    assert_eq!(body["title"], "Biography");
    assert!(body["biography"].as_str().unwrap().len() > 0);
}

#[tokio::test]
async fn test_about_update_is_shallow_merge() {
    let app = setup_app(setup_test_db().await);

    app.clone()
        .oneshot(put_request(
            "/api/about",
            json!({"biography": "Singer and producer from Kigali."}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(put_request(
            "/api/about",
            json!({"image": "/images/press.jpg"}),
        ))
        .await
        .unwrap();
    let body = extract_json(response.into_body()).await;

    assert_eq!(body["biography"], "Singer and producer from Kigali.");
    assert_eq!(body["image"], "/images/press.jpg");
}
