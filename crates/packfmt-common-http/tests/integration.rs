use packfmt_common_http::{ClientOptions, FetchError, HttpClient, StatusClass};
use serde::Deserialize;
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Debug, Deserialize, PartialEq)]
struct Payload {
    id: String,
}

fn client() -> HttpClient {
    HttpClient::new(&ClientOptions::default()).expect("Failed to create client")
}

#[tokio::test]
async fn test_get_json_decodes_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/manifest.json"))
        .and(header("user-agent", "mirror-bot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "id": "1.20" })))
        .mount(&server)
        .await;

    let options = ClientOptions {
        user_agent: Some("mirror-bot".to_string()),
        ..ClientOptions::default()
    };
    let client = HttpClient::new(&options).unwrap();
    let payload: Payload = client
        .get_json(&format!("{}/manifest.json", server.uri()))
        .await
        .unwrap();
    assert_eq!(payload, Payload { id: "1.20".to_string() });
}

#[tokio::test]
async fn test_status_errors_are_classified() {
    let server = MockServer::start().await;
    Mock::given(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;
    Mock::given(path("/broken"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    Mock::given(path("/busy"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "60"))
        .mount(&server)
        .await;

    let client = client();

    match client.get_bytes(&format!("{}/missing", server.uri())).await {
        Err(FetchError::Status { status, class, body, .. }) => {
            assert_eq!(status, 404);
            assert_eq!(class, StatusClass::Client);
            assert_eq!(body, "Not Found");
        }
        other => panic!("Expected client status error, got {other:?}"),
    }

    match client.get_bytes(&format!("{}/broken", server.uri())).await {
        Err(FetchError::Status { status, class, .. }) => {
            assert_eq!(status, 503);
            assert_eq!(class, StatusClass::Server);
        }
        other => panic!("Expected server status error, got {other:?}"),
    }

    match client.get_bytes(&format!("{}/busy", server.uri())).await {
        Err(FetchError::Status { class, retry_after, .. }) => {
            assert_eq!(class, StatusClass::RateLimited);
            assert_eq!(retry_after, Some(Duration::from_secs(60)));
        }
        other => panic!("Expected rate limit, got {other:?}"),
    }
}

#[tokio::test]
async fn test_decode_failure_keeps_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = client().get_json::<Payload>(&server.uri()).await.unwrap_err();
    assert!(!err.is_unavailable());
    assert_eq!(err.body(), Some("not json"));
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let options = ClientOptions {
        request_timeout: Duration::from_millis(200),
        ..ClientOptions::default()
    };
    let err = HttpClient::new(&options)
        .unwrap()
        .get_bytes(&server.uri())
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::Timeout { .. }), "{err:?}");
    assert!(err.is_unavailable());
}

#[tokio::test]
async fn test_unreachable_host_is_transport_error() {
    let err = client().get_bytes("http://127.0.0.1:9/manifest.json").await.unwrap_err();
    assert!(err.is_unavailable());
    assert!(err.body().is_none());
}
