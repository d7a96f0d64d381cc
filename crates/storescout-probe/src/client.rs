//! HTTP fetch with protocol downgrade for candidate verification.

use std::time::Duration;

use chrono::Utc;
use reqwest::{Client, StatusCode, Url};

use crate::classify::{classify_page, PageClassification};
use crate::error::ProbeError;
use crate::types::StoreRecord;

/// Fetches candidate pages and runs the per-URL verification check.
///
/// Every per-URL failure mode (non-200 statuses, transport errors, timeouts,
/// unparseable URLs, unreadable bodies) is logged and collapsed to an absent
/// result so one bad candidate never disturbs the rest of its batch.
pub struct ProbeClient {
    client: Client,
}

impl ProbeClient {
    /// Creates a probe client with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Runs the full per-URL check: fetch, fingerprint, extract.
    ///
    /// Returns `None` when the page cannot be fetched or carries no platform
    /// fingerprint.
    pub async fn verify_store(&self, url: &str) -> Option<StoreRecord> {
        tracing::info!(url, "verifying candidate");

        let html = self.fetch_html(url).await?;
        let Some(classification) = classify_page(&html) else {
            tracing::info!(url, "no platform fingerprints found");
            return None;
        };

        let PageClassification {
            title,
            description,
            emails,
        } = classification;
        let emails: Vec<String> = emails.into_iter().collect();
        if !emails.is_empty() {
            tracing::info!(url, emails = ?emails, "found contact emails");
        }
        tracing::info!(url, title = %title, "verified storefront");

        Some(StoreRecord {
            url: url.to_owned(),
            title,
            description,
            emails,
            verified: true,
            discovery_date: Utc::now().format("%Y-%m-%d").to_string(),
        })
    }

    /// Fetches a candidate page, downgrading `https` to `http` once when the
    /// secure attempt is refused with 401/403 or dies during connection
    /// setup (TLS handshake included).
    pub async fn fetch_html(&self, url: &str) -> Option<String> {
        match self.client.get(url).send().await {
            Ok(response) => {
                let status = response.status();
                if status == StatusCode::OK {
                    return read_body(url, response).await;
                }
                if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
                    tracing::debug!(url, status = status.as_u16(), "access denied");
                    return self.fetch_downgraded(url).await;
                }
                tracing::debug!(url, status = status.as_u16(), "unexpected status, skipping");
                None
            }
            Err(e) if e.is_connect() => {
                tracing::debug!(url, error = %e, "connection failed");
                self.fetch_downgraded(url).await
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "fetch failed");
                None
            }
        }
    }

    /// Single retry over plain HTTP. Applies only to `https` URLs; anything
    /// else has no insecure equivalent and yields an absent result.
    async fn fetch_downgraded(&self, url: &str) -> Option<String> {
        let insecure = downgrade_to_http(url)?;
        tracing::debug!(url, insecure = %insecure, "retrying over plain http");

        match self.client.get(insecure).send().await {
            Ok(response) if response.status() == StatusCode::OK => read_body(url, response).await,
            Ok(response) => {
                tracing::debug!(
                    url,
                    status = response.status().as_u16(),
                    "insecure fallback refused"
                );
                None
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "insecure fallback failed");
                None
            }
        }
    }
}

async fn read_body(url: &str, response: reqwest::Response) -> Option<String> {
    match response.text().await {
        Ok(body) => {
            tracing::debug!(url, bytes = body.len(), "fetched page body");
            Some(body)
        }
        Err(e) => {
            tracing::debug!(url, error = %e, "failed to read response body");
            None
        }
    }
}

/// Derives the plain-HTTP equivalent of a secure URL.
///
/// The scheme is swapped on the parsed URL, so a URL whose query string
/// embeds another `https://` link elsewhere is unaffected. Non-`https`
/// inputs have no downgrade.
fn downgrade_to_http(url: &str) -> Option<Url> {
    let mut parsed = Url::parse(url).ok()?;
    if parsed.scheme() != "https" {
        return None;
    }
    parsed.set_scheme("http").ok()?;
    Some(parsed)
}
