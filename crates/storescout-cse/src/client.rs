//! HTTP client for the Google Custom Search JSON API.
//!
//! Wraps `reqwest` with credential management and typed response
//! deserialization. Non-2xx statuses are surfaced as [`SearchError::Api`]
//! with the message recovered from Google's error envelope when the body
//! carries one.

use std::time::Duration;

use reqwest::{Client, Url};

use crate::error::SearchError;
use crate::types::{ApiErrorEnvelope, CsePage};

const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/customsearch/v1";

/// Results per page served by the API; a shorter page means the query is
/// exhausted.
pub const PAGE_SIZE: usize = 10;

/// The API refuses offsets at or past the first 100 results of any query.
pub const MAX_START: u32 = 100;

/// Client for the Custom Search JSON API.
///
/// Manages the HTTP client, the API key / search engine id pair, and the base
/// URL. Use [`CseClient::new`] for production or [`CseClient::with_base_url`]
/// to point at a mock server in tests.
pub struct CseClient {
    client: Client,
    api_key: String,
    cse_id: String,
    base_url: Url,
}

impl CseClient {
    /// Creates a new client pointed at the production Custom Search endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, cse_id: &str, timeout_secs: u64) -> Result<Self, SearchError> {
        Self::with_base_url(api_key, cse_id, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a new client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`SearchError::InvalidBaseUrl`] if `base_url`
    /// does not parse.
    pub fn with_base_url(
        api_key: &str,
        cse_id: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("storescout/0.1 (storefront-discovery)")
            .build()?;

        let base_url = Url::parse(base_url)
            .map_err(|e| SearchError::InvalidBaseUrl(format!("'{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            cse_id: cse_id.to_owned(),
            base_url,
        })
    }

    /// Fetches one page of results for `query`, starting at the 1-based
    /// result offset `start`.
    ///
    /// # Errors
    ///
    /// - [`SearchError::Api`] if the API returns a non-2xx status.
    /// - [`SearchError::Http`] on network failure.
    /// - [`SearchError::Deserialize`] if the response does not match the
    ///   expected shape.
    pub async fn search_page(&self, query: &str, start: u32) -> Result<CsePage, SearchError> {
        let url = self.build_url(query, start);
        tracing::debug!(query = %query, start, "requesting search page");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&body)
                .map_or_else(|_| snippet(&body), |envelope| envelope.error.message);
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| SearchError::Deserialize {
            context: format!("search(q={query}, start={start})"),
            source: e,
        })
    }

    /// Builds the full request URL with properly percent-encoded query
    /// parameters via [`Url::query_pairs_mut`].
    fn build_url(&self, query: &str, start: u32) -> Url {
        let mut url = self.base_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("key", &self.api_key);
            pairs.append_pair("cx", &self.cse_id);
            pairs.append_pair("q", query);
            pairs.append_pair("start", &start.to_string());
        }
        url
    }
}

/// First few hundred bytes of a body, for error messages.
fn snippet(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(base_url: &str) -> CseClient {
        CseClient::with_base_url("test-key", "test-cx", 15, base_url)
            .expect("client construction should not fail")
    }

    #[test]
    fn build_url_constructs_correct_query_string() {
        let client = test_client("https://www.googleapis.com/customsearch/v1");
        let url = client.build_url("nettbutikk shopify", 11);
        assert_eq!(
            url.as_str(),
            "https://www.googleapis.com/customsearch/v1?key=test-key&cx=test-cx&q=nettbutikk+shopify&start=11"
        );
    }

    #[test]
    fn build_url_encodes_quoted_query() {
        let client = test_client("https://www.googleapis.com/customsearch/v1");
        let url = client.build_url(r#"site:.no "Powered by Shopify""#, 1);
        assert!(
            url.as_str()
                .contains("q=site%3A.no+%22Powered+by+Shopify%22"),
            "query param should be form-encoded: {url}"
        );
    }

    #[test]
    fn with_base_url_rejects_invalid_url() {
        let result = CseClient::with_base_url("k", "cx", 15, "not a url");
        assert!(
            matches!(result, Err(SearchError::InvalidBaseUrl(_))),
            "expected InvalidBaseUrl, got a client"
        );
    }
}
