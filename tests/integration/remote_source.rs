//! Remote-fetch deployment tests (using WireMock).

use std::sync::Arc;

use axum::http::StatusCode;
use meteodaten_api::api::{create_router, AppState};
use meteodaten_api::source::{DataSource, RemoteSource};
use meteodaten_api::FetchError;
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::get_json;

const UPSTREAM_PATH: &str = "/meteo/2023.json";

fn remote_app(url: Url) -> axum::Router {
    let source = RemoteSource::new(url).unwrap();
    create_router(AppState::new(Arc::new(source)))
}

fn upstream_url(server: &MockServer) -> Url {
    Url::parse(&format!("{}{}", server.uri(), UPSTREAM_PATH)).unwrap()
}

#[tokio::test]
async fn test_upstream_success_is_relayed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"a": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = get_json(remote_app(upstream_url(&mock_server)), "/api/py/meteodaten").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"a": 1}));
}

#[tokio::test]
async fn test_upstream_503_returns_500_detail() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&mock_server)
        .await;

    let (status, body) = get_json(remote_app(upstream_url(&mock_server)), "/api/py/meteodaten").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    assert!(detail.starts_with("Fehler beim Abrufen der Daten: "));
    assert!(detail.contains("503"), "detail was: {}", detail);
}

#[tokio::test]
async fn test_unreachable_upstream_returns_500_detail() {
    // Reserve a port, then free it so nothing is listening there
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let url = Url::parse(&format!("http://127.0.0.1:{}/meteo.json", port)).unwrap();
    let (status, body) = get_json(remote_app(url), "/api/py/meteodaten").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let detail = body["detail"].as_str().unwrap();
    let cause = detail
        .strip_prefix("Fehler beim Abrufen der Daten: ")
        .expect("detail prefix");
    assert!(
        cause.contains("error sending request"),
        "cause was: {}",
        cause
    );
    assert!(cause.contains(&port.to_string()), "cause was: {}", cause);
}

#[tokio::test]
async fn test_non_json_upstream_body_is_network_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&mock_server)
        .await;

    let source = RemoteSource::new(upstream_url(&mock_server)).unwrap();
    let err = source.fetch().await.unwrap_err();

    assert!(matches!(err, FetchError::Network(_)));
}

#[tokio::test]
async fn test_each_request_hits_upstream() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([1, 2])))
        .expect(3)
        .mount(&mock_server)
        .await;

    let app = remote_app(upstream_url(&mock_server));
    for _ in 0..3 {
        let (status, body) = get_json(app.clone(), "/api/py/meteodaten").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([1, 2]));
    }
}

#[tokio::test]
async fn test_test_endpoint_ignores_upstream_state() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&mock_server)
        .await;

    let (status, body) = get_json(remote_app(upstream_url(&mock_server)), "/api/py/test").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"message": "Test erfolgreich"}));
}

#[tokio::test]
async fn test_upstream_large_integers_are_relayed_exactly() {
    let mock_server = MockServer::start().await;
    let raw = r#"{"id":123456789012345678901234567890,"n":-9223372036854775809}"#;

    Mock::given(method("GET"))
        .and(path(UPSTREAM_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(raw, "application/json"))
        .mount(&mock_server)
        .await;

    let source = RemoteSource::new(upstream_url(&mock_server)).unwrap();
    let value = source.fetch().await.unwrap();

    assert_eq!(serde_json::to_string(&value).unwrap(), raw);
}
