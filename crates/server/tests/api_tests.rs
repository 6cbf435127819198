//! End-to-end API tests with mocked external dependencies.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::TestFixture;

#[tokio::test]
async fn test_health() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/health").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
}

#[tokio::test]
async fn test_config_redacts_secrets() {
    let fixture = TestFixture::new();
    let response = fixture.get("/api/v1/config").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["home_assistant"]["token"], "***");
    assert_eq!(response.body["plex"]["token"], "***");
    let raw = response.body.to_string();
    assert!(!raw.contains("secret-ha-token"));
    assert!(!raw.contains("secret-plex-token"));
}

#[tokio::test]
async fn test_command_dispatches_playback() {
    let fixture = TestFixture::new();
    fixture
        .llm
        .set_reply(r#"{"control": {"type": "movie"}, "query": {"title": "dune"}}"#);

    let response = fixture
        .post("/api/v1/command", json!({"command": "play dune"}))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["zone"], "living_room");
    assert_eq!(response.body["media_type"], "MOVIE");
    assert_eq!(response.body["readiness"], "ready");
    assert_eq!(response.body["payload"]["id"], "101");

    assert_eq!(fixture.hass.count_calls("play_media"), 1);
}

#[tokio::test]
async fn test_command_translation_failure_is_unprocessable() {
    let fixture = TestFixture::new();
    fixture.llm.set_reply("I could not figure that one out.");

    let response = fixture
        .post("/api/v1/command", json!({"command": "mumble mumble"}))
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response.body["error"].as_str().unwrap().contains("contract"));
    assert_eq!(fixture.hass.count_calls("play_media"), 0);
}

#[tokio::test]
async fn test_command_dispatch_failure_is_bad_gateway() {
    let fixture = TestFixture::new();
    fixture
        .llm
        .set_reply(r#"{"control": {"type": "movie"}, "query": {"title": "dune"}}"#);
    fixture.hass.fail_all_services(true);

    let response = fixture
        .post("/api/v1/command", json!({"command": "play dune"}))
        .await;

    assert_eq!(response.status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_catalog_refresh_and_status() {
    let fixture = TestFixture::new();

    let response = fixture.get("/api/v1/catalog/status").await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 0);

    let response = fixture.post("/api/v1/catalog/refresh", json!({})).await;
    assert_eq!(response.status, StatusCode::OK);
    let sections = response.body.as_array().unwrap();
    assert_eq!(sections.len(), 1);
    assert_eq!(sections[0]["kind"], "movie");
    assert_eq!(sections[0]["entries"], 1);
}

#[tokio::test]
async fn test_catalog_refresh_failure_keeps_status_empty() {
    let fixture = TestFixture::new();
    fixture.source.fail_sections(true);

    let response = fixture.post("/api/v1/catalog/refresh", json!({})).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_metrics_endpoint() {
    let fixture = TestFixture::new();
    fixture.get("/api/v1/health").await;

    let response = fixture.get("/metrics").await;
    assert_eq!(response.status, StatusCode::OK);
    assert!(response
        .body
        .as_str()
        .unwrap()
        .contains("showrunner_http_requests_total"));
}
