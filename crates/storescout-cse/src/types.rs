//! Custom Search API response types.
//!
//! Only the fields this pipeline consumes are modelled; serde skips the rest
//! of Google's envelope (search metadata, promotions, spelling suggestions).

use serde::Deserialize;

/// A single search result.
///
/// `link` is the only load-bearing field; `title` and `snippet` are carried
/// for logging while the item is alive (items are dropped after URL
/// deduplication).
#[derive(Debug, Clone, Deserialize)]
pub struct CseItem {
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
}

/// One page of results for a query.
///
/// The API omits `items` entirely when a query has no further results, so a
/// missing field deserializes to an empty page.
#[derive(Debug, Deserialize)]
pub struct CsePage {
    #[serde(default)]
    pub items: Vec<CseItem>,
}

/// Error envelope returned with non-2xx statuses:
/// `{"error": {"code": 429, "message": "Quota exceeded..."}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub(crate) error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub(crate) message: String,
}
