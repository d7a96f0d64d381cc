//! Integration tests for `CseClient` using wiremock HTTP mocks.

use storescout_cse::{CseClient, SearchError};
use wiremock::matchers::{method, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> CseClient {
    CseClient::with_base_url("test-key", "test-cx", 15, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn search_page_returns_items() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "kind": "customsearch#search",
        "items": [
            {
                "title": "Nordlys Nettbutikk",
                "link": "https://nordlys.no/",
                "snippet": "Powered by Shopify ..."
            },
            {
                "title": "Fjellsport",
                "link": "https://fjellsport.no/collections/all",
                "snippet": "Norsk nettbutikk for friluftsliv"
            }
        ]
    });

    Mock::given(method("GET"))
        .and(query_param("key", "test-key"))
        .and(query_param("cx", "test-cx"))
        .and(query_param("q", "site:.no nettbutikk shopify"))
        .and(query_param("start", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .search_page("site:.no nettbutikk shopify", 1)
        .await
        .expect("should parse result page");

    assert_eq!(page.items.len(), 2);
    assert_eq!(page.items[0].link, "https://nordlys.no/");
    assert_eq!(page.items[0].title, "Nordlys Nettbutikk");
    assert_eq!(page.items[1].link, "https://fjellsport.no/collections/all");
}

#[tokio::test]
async fn search_page_without_items_field_is_empty() {
    let server = MockServer::start().await;

    // Google omits `items` entirely once a query is exhausted.
    let body = serde_json::json!({
        "kind": "customsearch#search",
        "queries": { "request": [] }
    });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .search_page("site:.no vipps shopify", 91)
        .await
        .expect("should parse empty page");

    assert!(page.items.is_empty(), "got: {:?}", page.items);
}

#[tokio::test]
async fn search_page_surfaces_api_error_envelope() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "error": {
            "code": 429,
            "message": "Quota exceeded for quota metric 'Queries'",
            "status": "RESOURCE_EXHAUSTED"
        }
    });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search_page("site:.no klarna shopify", 1).await;

    match result {
        Err(SearchError::Api { status, message }) => {
            assert_eq!(status, 429);
            assert!(message.contains("Quota exceeded"), "got: {message}");
        }
        other => panic!("expected SearchError::Api, got: {other:?}"),
    }
}

#[tokio::test]
async fn search_page_http_error_without_envelope_keeps_body_snippet() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend unavailable"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let result = client.search_page("site:.no nettbutikk shopify", 1).await;

    match result {
        Err(SearchError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "backend unavailable");
        }
        other => panic!("expected SearchError::Api, got: {other:?}"),
    }
}

#[tokio::test]
async fn search_page_tolerates_items_missing_links() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "items": [
            { "title": "No link at all" },
            { "link": "https://butikk.no/", "title": "Butikk" }
        ]
    });

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let page = client
        .search_page("site:.no nettbutikk shopify", 1)
        .await
        .expect("should parse page with partial items");

    assert_eq!(page.items.len(), 2);
    assert!(page.items[0].link.is_empty());
    assert_eq!(page.items[1].link, "https://butikk.no/");
}
