//! Integration tests for the HTTP client against a mock server.
//!
//! Verifies the wire contract: paths, query parameters, and form fields.

use chirp_client::{HttpApi, HttpConfig};
use chirp_core::{ApiClient, TranslateRequest};
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn api_for(server: &MockServer) -> HttpApi {
    HttpApi::new(HttpConfig::default().with_base_url(server.uri())).expect("client")
}

#[tokio::test]
async fn test_notifications_sends_cursor_and_decodes_batch() {
    let server = MockServer::start().await;

    let batch = serde_json::json!([
        {"name": "unread_message_count", "data": 2, "timestamp": 12.5},
        {"name": "task_progress", "data": {"task_id": "t1", "progress": 50.0}, "timestamp": 13.0}
    ]);

    Mock::given(method("GET"))
        .and(path("/notifications"))
        .and(query_param("since", "12.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&batch))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let notifications = api.notifications(12.5).await.expect("fetch");

    assert_eq!(notifications.len(), 2);
    assert_eq!(notifications[0].name, "unread_message_count");
    assert_eq!(notifications[1].timestamp, 13.0);
}

#[tokio::test]
async fn test_notifications_legacy_path() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/main/notifications"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let api = HttpApi::new(
        HttpConfig::default()
            .with_base_url(server.uri())
            .with_legacy_notifications(true),
    )
    .expect("client");

    let notifications = api.notifications(0.0).await.expect("fetch");
    assert!(notifications.is_empty());
}

#[tokio::test]
async fn test_notifications_server_error_is_request_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/notifications"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let api = api_for(&server);
    let result = api.notifications(0.0).await;
    assert!(matches!(result, Err(chirp_core::Error::Request(_))));
}

#[tokio::test]
async fn test_translate_posts_form_fields() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_string_contains("text_to_translate=hallo"))
        .and(body_string_contains("source_language=de"))
        .and(body_string_contains("destination_language=en"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"text": "hello"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let translated = api
        .translate(TranslateRequest {
            text: "hallo".to_string(),
            source_language: "de".to_string(),
            destination_language: "en".to_string(),
        })
        .await
        .expect("translate");

    assert_eq!(translated, "hello");
}

#[tokio::test]
async fn test_user_popup_fetches_fragment() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/susan/popup"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<div class=\"card\">susan</div>"))
        .expect(1)
        .mount(&server)
        .await;

    let api = api_for(&server);
    let html = api.user_popup("susan").await.expect("popup");
    assert_eq!(html, "<div class=\"card\">susan</div>");
}

#[tokio::test]
async fn test_user_popup_error_status_is_request_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ghost/popup"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let api = api_for(&server);
    assert!(api.user_popup("ghost").await.is_err());
}
