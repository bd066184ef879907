//! Integration tests for `WegotripClient::get_feed` using wiremock HTTP mocks.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::json;
use tpgate_core::ProviderError;
use tpgate_wegotrip::{CityIndex, FeedQuery, WegotripClient};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Region A knows Paris (id 1) and Batumi (id 300); region B knows Moscow
/// (id 7) and also Batumi (id 77).
fn test_cities() -> Arc<CityIndex> {
    let com = HashMap::from([("paris".to_string(), 1), ("batumi".to_string(), 300)]);
    let ru = HashMap::from([("москва".to_string(), 7), ("batumi".to_string(), 77)]);
    Arc::new(CityIndex::new(com, ru))
}

fn test_client(com: &MockServer, ru: &MockServer) -> WegotripClient {
    WegotripClient::with_base_urls(30, &com.uri(), &ru.uri(), test_cities())
        .expect("client construction should not fail")
}

fn popular_body(count: i64, city_slug: &str) -> serde_json::Value {
    let results: Vec<serde_json::Value> = (1..=count)
        .map(|id| {
            json!({
                "id": id,
                "title": format!("Tour {id}"),
                "slug": format!("tour-{id}"),
                "cover": format!("https://cdn.example/{id}.jpg"),
                "price": 25.5,
                "city": {"id": 1, "name": "City", "slug": city_slug}
            })
        })
        .collect();
    json!({
        "data": {
            "count": count,
            "pages": 1,
            "current": 1,
            "maxPrice": 25.5,
            "results": results
        }
    })
}

fn query(city: &str, page: Option<i64>) -> FeedQuery {
    FeedQuery {
        page,
        ..FeedQuery::new(city)
    }
}

#[tokio::test]
async fn get_feed_uses_region_a_with_defaults() {
    let com = MockServer::start().await;
    let ru = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/v2/products/popular/"))
        .and(query_param("city", "1"))
        .and(query_param("lang", "ru"))
        .and(query_param("currency", "RUB"))
        .respond_with(ResponseTemplate::new(200).set_body_json(popular_body(2, "paris")))
        .expect(1)
        .mount(&com)
        .await;

    let client = test_client(&com, &ru);
    let items = client
        .get_feed(&query("Paris", None))
        .await
        .expect("feed should load");

    assert_eq!(items.len(), 2);
    assert_eq!(items[0].deep_link, "https://app.wegotrip.com/paris-d1/tour-1-p1");
    assert_eq!(items[1].title, "Tour 2");
}

#[tokio::test]
async fn get_feed_uses_region_b_host_and_domain() {
    let com = MockServer::start().await;
    let ru = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("city", "7"))
        .and(query_param("lang", "en"))
        .and(query_param("currency", "USD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(popular_body(1, "moscow")))
        .expect(1)
        .mount(&ru)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&com)
        .await;

    let client = test_client(&com, &ru);
    let feed_query = FeedQuery {
        city: "МОСКВА".to_string(),
        language: Some("EN".to_string()),
        currency: Some("USD".to_string()),
        page: Some(1),
    };
    let items = client.get_feed(&feed_query).await.expect("feed should load");

    assert_eq!(items.len(), 1);
    assert_eq!(items[0].deep_link, "https://wegotrip.ru/moscow-d7/tour-1-p1");
}

#[tokio::test]
async fn city_in_both_regions_resolves_to_region_a() {
    let com = MockServer::start().await;
    let ru = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("city", "300"))
        .respond_with(ResponseTemplate::new(200).set_body_json(popular_body(1, "batumi")))
        .expect(1)
        .mount(&com)
        .await;

    let client = test_client(&com, &ru);
    let items = client.get_feed(&query("batumi", None)).await.unwrap();

    assert_eq!(items[0].deep_link, "https://app.wegotrip.com/batumi-d300/tour-1-p1");
    assert!(ru.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_city_fails_without_request() {
    let com = MockServer::start().await;
    let ru = MockServer::start().await;

    let client = test_client(&com, &ru);
    let err = client.get_feed(&query("Atlantis", None)).await.unwrap_err();

    assert_eq!(err.code(), "city_not_found");
    assert!(com.received_requests().await.unwrap().is_empty());
    assert!(ru.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn pages_of_seven_results() {
    let com = MockServer::start().await;
    let ru = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(popular_body(7, "paris")))
        .mount(&com)
        .await;

    let client = test_client(&com, &ru);
    let mut pages = Vec::new();
    for page in [1, 2, 3, 4] {
        let items = client.get_feed(&query("paris", Some(page))).await.unwrap();
        pages.push(items.iter().map(|i| i.id).collect::<Vec<_>>());
    }

    assert_eq!(pages, vec![vec![1, 2, 3], vec![4, 5, 6], vec![7], vec![]]);
}

#[tokio::test]
async fn non_positive_page_is_first_page() {
    let com = MockServer::start().await;
    let ru = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(popular_body(5, "paris")))
        .mount(&com)
        .await;

    let client = test_client(&com, &ru);
    let first = client.get_feed(&query("paris", Some(1))).await.unwrap();
    for page in [0, -1, -100] {
        let items = client.get_feed(&query("paris", Some(page))).await.unwrap();
        assert_eq!(items, first, "page {page} should equal page 1");
    }
}

#[tokio::test]
async fn error_envelope_on_http_200_is_wegotrip_api_error() {
    let com = MockServer::start().await;
    let ru = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"errors": [{"message": "Unknown currency"}]})),
        )
        .mount(&com)
        .await;

    let client = test_client(&com, &ru);
    let err = client.get_feed(&query("paris", None)).await.unwrap_err();

    assert_eq!(
        err,
        ProviderError::domain("wegotrip_api_error", "Unknown currency")
    );
}

#[tokio::test]
async fn server_error_without_envelope_is_api_error() {
    let com = MockServer::start().await;
    let ru = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&com)
        .await;

    let client = test_client(&com, &ru);
    let err = client.get_feed(&query("paris", None)).await.unwrap_err();

    assert_eq!(err, ProviderError::api_status(502));
}

#[tokio::test]
async fn unreachable_partner_is_network_error() {
    let client = WegotripClient::with_base_urls(
        30,
        "http://127.0.0.1:9",
        "http://127.0.0.1:9",
        test_cities(),
    )
    .expect("client construction should not fail");

    let err = client.get_feed(&query("paris", None)).await.unwrap_err();
    assert_eq!(err.code(), "network_error");
}
