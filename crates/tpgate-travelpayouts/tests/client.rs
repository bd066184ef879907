//! Integration tests for `TravelpayoutsClient` using wiremock HTTP mocks.

use std::time::Duration;

use serde_json::json;
use tpgate_core::ProviderError;
use tpgate_travelpayouts::TravelpayoutsClient;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> TravelpayoutsClient {
    TravelpayoutsClient::with_base_url(30, base_url).expect("client construction should not fail")
}

fn success_body(partner_url: &str) -> serde_json::Value {
    json!({
        "code": "success",
        "status": 200,
        "result": {
            "trs": 123,
            "marker": 456,
            "shorten": true,
            "links": [{
                "url": "https://example.com",
                "code": "success",
                "partner_url": partner_url
            }]
        }
    })
}

#[tokio::test]
async fn create_affiliate_link_sends_expected_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/links/v1/create"))
        .and(header("X-Access-Token", "T"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "trs": 123,
            "marker": 456,
            "shorten": true,
            "links": [{"url": "https://example.com", "sub_id": "social_tool_main"}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("https://aff.example/x")))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let partner_url = client
        .create_affiliate_link("https://example.com", "T", "123", "456")
        .await
        .expect("link should be created");

    assert_eq!(partner_url, "https://aff.example/x");
}

#[tokio::test]
async fn non_numeric_ids_never_reach_the_network() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body("https://aff.example/x")))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());

    for (trs, marker, code) in [
        ("abc", "456", "invalid_trs"),
        ("", "456", "invalid_trs"),
        ("12a", "not-a-number", "invalid_trs"),
        ("123", "4.5", "invalid_marker"),
        ("123", "", "invalid_marker"),
    ] {
        let err = client
            .create_affiliate_link("https://example.com", "T", trs, marker)
            .await
            .expect_err("non-numeric ids must fail");
        assert_eq!(err.code(), code, "trs={trs:?} marker={marker:?}");
    }

    let received = server.received_requests().await.expect("recording enabled");
    assert!(received.is_empty(), "no request should have been sent");
}

#[tokio::test]
async fn per_link_error_is_relayed_verbatim() {
    let server = MockServer::start().await;

    let body = json!({
        "code": "success",
        "status": 200,
        "result": {"links": [{
            "url": "https://example.com",
            "code": "unknown_program",
            "message": "no partner program for this domain",
            "partner_url": ""
        }]}
    });

    Mock::given(method("POST"))
        .and(path("/links/v1/create"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .create_affiliate_link("https://example.com", "T", "1", "2")
        .await
        .unwrap_err();

    assert_eq!(
        err,
        ProviderError::partner("unknown_program", "no partner program for this domain")
    );
}

#[tokio::test]
async fn unauthorized_envelope_is_relayed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": "invalid token",
            "code": "unauthorized",
            "status": 401
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .create_affiliate_link("https://example.com", "bad", "1", "2")
        .await
        .unwrap_err();

    assert_eq!(err.code(), "unauthorized");
    assert_eq!(err.message(), "invalid token");
}

#[tokio::test]
async fn plain_text_server_error_is_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("service unavailable"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .create_affiliate_link("https://example.com", "T", "1", "2")
        .await
        .unwrap_err();

    assert_eq!(err, ProviderError::api_status(503));
}

#[tokio::test]
async fn slow_partner_times_out_as_network_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(success_body("https://aff.example/x"))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server)
        .await;

    let client = TravelpayoutsClient::with_base_url(1, &server.uri())
        .expect("client construction should not fail");
    let err = client
        .create_affiliate_link("https://example.com", "T", "1", "2")
        .await
        .unwrap_err();

    assert_eq!(err.code(), "network_error");
    assert!(matches!(err, ProviderError::Transport(_)));
}

#[tokio::test]
async fn unreachable_partner_is_network_error() {
    // Port 9 (discard) is closed on CI hosts; the connect fails immediately.
    let client = test_client("http://127.0.0.1:9");
    let err = client
        .create_affiliate_link("https://example.com", "T", "1", "2")
        .await
        .unwrap_err();

    assert_eq!(err.code(), "network_error");
}
