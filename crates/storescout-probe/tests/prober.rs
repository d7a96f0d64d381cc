//! Integration tests for `ProbeClient` using wiremock HTTP mocks.

use storescout_probe::ProbeClient;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_UA: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

fn test_client() -> ProbeClient {
    ProbeClient::new(15, TEST_UA).expect("client construction should not fail")
}

#[tokio::test]
async fn fetch_html_returns_body_on_200() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>hei</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client();
    let body = client.fetch_html(&server.uri()).await;

    assert_eq!(body.as_deref(), Some("<html>hei</html>"));
}

#[tokio::test]
async fn fetch_html_is_absent_on_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client();
    let body = client.fetch_html(&server.uri()).await;

    assert!(body.is_none(), "got: {body:?}");
}

#[tokio::test]
async fn forbidden_plain_http_url_has_no_fallback() {
    let server = MockServer::start().await;

    // 403 on an http:// URL: there is no insecure equivalent to retry, so
    // exactly one request may arrive.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client();
    let body = client.fetch_html(&server.uri()).await;

    assert!(body.is_none(), "got: {body:?}");
}

#[tokio::test]
async fn handshake_failure_downgrades_to_plain_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_string("<html>powered by shopify</html>"),
        )
        .mount(&server)
        .await;

    // The mock server only speaks plain HTTP, so the secure attempt dies in
    // the TLS handshake and the client must fall back to http:// on the same
    // host and port.
    let secure_url = format!("https://{}/", server.address());

    let client = test_client();
    let body = client.fetch_html(&secure_url).await;

    assert_eq!(body.as_deref(), Some("<html>powered by shopify</html>"));
}

#[tokio::test]
async fn timeout_is_absent_without_fallback() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html>sein</html>")
                .set_delay(std::time::Duration::from_secs(3)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = ProbeClient::new(1, TEST_UA).expect("client construction should not fail");
    let body = client.fetch_html(&server.uri()).await;

    assert!(body.is_none(), "got: {body:?}");
}

#[tokio::test]
async fn verify_store_builds_record_from_matching_page() {
    let server = MockServer::start().await;

    let page = r#"<html><head>
        <title>Nordlys Nettbutikk</title>
        <meta name="description" content="Håndlagde varer fra nord">
        <script src="https://cdn.shopify.com/s/files/1/0001/theme.js"></script>
        </head><body>
        <a href="mailto:Post@Nordlys.no?subject=Hei">kontakt</a>
        support@nordlys.no
        </body></html>"#;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    let client = test_client();
    let url = server.uri();
    let record = client
        .verify_store(&url)
        .await
        .expect("expected a verified record");

    assert_eq!(record.url, url);
    assert_eq!(record.title, "Nordlys Nettbutikk");
    assert_eq!(record.description, "Håndlagde varer fra nord");
    assert_eq!(record.emails, vec!["post@nordlys.no", "support@nordlys.no"]);
    assert!(record.verified);
    assert!(
        !record.discovery_date.is_empty(),
        "expected a date stamp, got: {record:?}"
    );
}

#[tokio::test]
async fn verify_store_rejects_page_without_fingerprints() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><title>Vanlig side</title>ingen butikk her</html>"),
        )
        .mount(&server)
        .await;

    let client = test_client();
    let record = client.verify_store(&server.uri()).await;

    assert!(record.is_none(), "got: {record:?}");
}

#[tokio::test]
async fn verify_store_is_absent_when_fetch_fails() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = test_client();
    let record = client.verify_store(&server.uri()).await;

    assert!(record.is_none(), "got: {record:?}");
}
