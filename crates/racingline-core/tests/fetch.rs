use std::sync::Arc;

use racingline_core::api::{data_headers, ApiClient, FetchError, Fetcher};
use racingline_core::auth::StaticKey;
use racingline_core::{DataController, RefreshError};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PAYLOAD: &str = r#"{
    "series": [{"seriesInfo": {"id": "f1", "name": "Formula 1", "shortName": "F1"}}],
    "circuits": [{"circuit": "Suzuka", "country": "Japan"}],
    "events": [{
        "id": "jp25",
        "eventName": "Japanese Grand Prix",
        "seriesId": "f1",
        "circuit": "Suzuka",
        "sessions": [
            {"id": "fp1", "sessionName": "Practice 1",
             "date": "2025-04-04T02:30:00Z", "duration": 60},
            {"id": "race", "sessionName": "Race", "date": "2025-04-06T05:00:00Z", "duration": 120}
        ]
    }]
}"#;

async fn mount_schedule(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/b/schedule"))
        .and(header("X-ACCESS-KEY", "secret"))
        .and(header("X-BIN-META", "false"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(PAYLOAD, "application/json"))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn fetcher_sends_bin_headers_and_returns_body() {
    let server = MockServer::start().await;
    mount_schedule(&server).await;

    let client = ApiClient::new().expect("client builds");
    let headers = data_headers("secret").expect("valid key");
    let url = format!("{}/b/schedule", server.uri());

    let body = client.fetch(&url, &headers).await.expect("fetch ok");
    assert_eq!(body, PAYLOAD.as_bytes());
}

#[tokio::test]
async fn fetcher_does_not_fail_on_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/b/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"message":"Bin not found"}"#))
        .mount(&server)
        .await;

    let client = ApiClient::new().expect("client builds");
    let headers = data_headers("secret").expect("valid key");
    let url = format!("{}/b/missing", server.uri());

    let body = client.fetch(&url, &headers).await.expect("status is not a transport error");
    assert_eq!(body, br#"{"message":"Bin not found"}"#);
}

#[tokio::test]
async fn fetcher_rejects_relative_url() {
    let client = ApiClient::new().expect("client builds");
    let headers = data_headers("secret").expect("valid key");

    let err = client.fetch("/b/schedule", &headers).await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidUrl { .. }));
}

#[tokio::test]
async fn fetcher_reports_connection_failure() {
    // Reserve a free port, then release it so nothing is listening
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    let url = format!("http://127.0.0.1:{}/b/schedule", port);

    let client = ApiClient::new().expect("client builds");
    let headers = data_headers("secret").expect("valid key");

    let err = client.fetch(&url, &headers).await.unwrap_err();
    assert!(matches!(err, FetchError::NetworkError(_)));
}

#[tokio::test]
async fn controller_refresh_end_to_end() {
    let server = MockServer::start().await;
    mount_schedule(&server).await;

    let controller = DataController::with_fetcher(
        format!("{}/b/schedule", server.uri()),
        Arc::new(StaticKey::new("secret")),
        Arc::new(ApiClient::new().expect("client builds")),
    );

    controller.refresh().await.expect("refresh ok");

    let state = controller.state();
    assert_eq!(state.snapshot.events.len(), 1);
    assert_eq!(state.views.sessions.len(), 2);
    assert_eq!(state.views.sessions[0].id, "fp1");
    assert_eq!(
        controller.circuit_by_name("Suzuka").and_then(|c| c.country),
        Some("Japan".to_string())
    );
}

#[tokio::test]
async fn controller_keeps_state_when_server_returns_error_page() {
    let server = MockServer::start().await;
    mount_schedule(&server).await;

    let url = format!("{}/b/schedule", server.uri());
    let controller = DataController::with_fetcher(
        url,
        Arc::new(StaticKey::new("secret")),
        Arc::new(ApiClient::new().expect("client builds")),
    );
    controller.refresh().await.expect("first refresh ok");
    let before = controller.state();

    server.reset().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = controller.refresh().await.unwrap_err();
    assert!(matches!(err, RefreshError::Decode(_)));
    assert!(Arc::ptr_eq(&before, &controller.state()));
}
