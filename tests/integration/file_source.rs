//! Local-file deployment tests.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use meteodaten_api::api::{create_router, AppState};
use meteodaten_api::source::LocalFileSource;
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;

use crate::get_json;

fn app_for(path: &std::path::Path) -> axum::Router {
    create_router(AppState::new(Arc::new(LocalFileSource::new(path))))
}

#[tokio::test]
async fn test_valid_file_returns_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("meteodaten_2023_daily.json");
    let payload = json!([
        {"Datum": "2023-01-01T00:00+0100", "Standort": "Zch_Stampfenbachstrasse", "Parameter": "T", "Wert": 7.5},
        {"Datum": "2023-01-02T00:00+0100", "Standort": "Zch_Stampfenbachstrasse", "Parameter": "T", "Wert": 6.1}
    ]);
    std::fs::write(&path, serde_json::to_vec(&payload).unwrap()).unwrap();

    let (status, body) = get_json(app_for(&path), "/api/py/meteodaten").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, payload);
}

#[tokio::test]
async fn test_missing_file_returns_error_object_with_200() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("does_not_exist.json");

    let (status, body) = get_json(app_for(&path), "/api/py/meteodaten").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"error": "JSON file not found. Please check the path and filename."})
    );
}

#[tokio::test]
async fn test_invalid_json_returns_error_object_with_200() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{not json").unwrap();

    let (status, body) = get_json(app_for(&path), "/api/py/meteodaten").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"error": "Invalid JSON format. Please check the file content."})
    );
}

#[tokio::test]
async fn test_file_created_after_startup_is_served() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("late.json");
    let app = app_for(&path);

    let (_, body) = get_json(app.clone(), "/api/py/meteodaten").await;
    assert!(body.get("error").is_some());

    std::fs::write(&path, r#"{"ready": true}"#).unwrap();

    let (status, body) = get_json(app, "/api/py/meteodaten").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"ready": true}));
}

#[tokio::test]
async fn test_large_integers_are_relayed_byte_for_byte() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ids.json");
    let raw = r#"{"id":123456789012345678901234567890}"#;
    std::fs::write(&path, raw).unwrap();

    let response = app_for(&path)
        .oneshot(
            Request::builder()
                .uri("/api/py/meteodaten")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(std::str::from_utf8(&bytes).unwrap(), raw);
}
