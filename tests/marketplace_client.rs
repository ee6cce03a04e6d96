//! Tests for the HTTP marketplace client against a mock marketplace.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use marketplace_integration::adapters::marketplace::{
    HttpMarketplaceClient, MarketplaceClientConfig,
};
use marketplace_integration::domain::integration::EventType;
use marketplace_integration::ports::{MarketplaceClient, MarketplaceError};

fn client() -> HttpMarketplaceClient {
    HttpMarketplaceClient::new(
        MarketplaceClientConfig::new("consumer-key", "consumer-secret")
            .with_request_timeout(Duration::from_secs(5)),
    )
    .unwrap()
}

#[tokio::test]
async fn reads_event_with_signed_json_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/integration/v1/events/tok-1"))
        .and(header("accept", "application/json"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "type": "SUBSCRIPTION_NOTICE",
            "marketplace": { "baseUrl": server.uri(), "partner": "ACME" },
            "payload": { "notice": { "type": "REACTIVATED" } }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let event = client()
        .read_event(&server.uri(), "tok-1")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(event.event_type, Some(EventType::SubscriptionNotice));
    assert_eq!(event.marketplace_base_url(), Some(server.uri().as_str()));

    let requests = server.received_requests().await.unwrap();
    let authorization = requests[0]
        .headers
        .get("authorization")
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(authorization.starts_with("OAuth "));
    assert!(authorization.contains("oauth_consumer_key=\"consumer-key\""));
    assert!(authorization.contains("oauth_signature_method=\"HMAC-SHA1\""));
}

#[tokio::test]
async fn unknown_token_reads_as_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/integration/v1/events/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let event = client().read_event(&server.uri(), "missing").await.unwrap();
    assert!(event.is_none());
}

#[tokio::test]
async fn server_errors_carry_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client().read_event(&server.uri(), "tok").await.unwrap_err();
    assert_eq!(err, MarketplaceError::api(503, "maintenance"));
}

#[tokio::test]
async fn oversized_error_bodies_are_truncated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("e".repeat(100_000)))
        .mount(&server)
        .await;

    let err = client().read_event(&server.uri(), "tok").await.unwrap_err();
    match err {
        MarketplaceError::Api { status, body } => {
            assert_eq!(status, 500);
            assert!(body.len() <= 515);
            assert!(body.ends_with("..."));
        }
        other => panic!("expected API error, got {:?}", other),
    }
}

#[tokio::test]
async fn malformed_body_is_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = client().read_event(&server.uri(), "tok").await.unwrap_err();
    assert!(matches!(err, MarketplaceError::InvalidResponse(_)));
}

#[tokio::test]
async fn unreachable_marketplace_is_network_error() {
    let err = client()
        .read_event("http://127.0.0.1:1", "tok")
        .await
        .unwrap_err();
    assert!(matches!(err, MarketplaceError::Network(_)));
}
