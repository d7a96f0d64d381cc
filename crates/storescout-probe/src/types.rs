use serde::Serialize;

/// A verified storefront.
///
/// Only constructed after the fetched page matched at least one platform
/// fingerprint; never mutated afterwards. `verified` is always `true` for a
/// constructed record and exists so exports carry the flag explicitly.
#[derive(Debug, Clone, Serialize)]
pub struct StoreRecord {
    pub url: String,
    pub title: String,
    pub description: String,
    /// Lower-cased, deduplicated, sorted.
    pub emails: Vec<String>,
    pub verified: bool,
    /// `%Y-%m-%d`, UTC.
    pub discovery_date: String,
}
