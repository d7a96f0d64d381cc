//! Platform fingerprinting and page-field extraction.
//!
//! Extraction scans the raw HTML with regexes rather than building a DOM:
//! candidate pages are frequently malformed, and the contract here is that
//! classification never fails. Missing or broken markup degrades to the
//! fallback values.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::{Regex, RegexSet, RegexSetBuilder};

use crate::emails::extract_emails;

/// Markers that identify a Shopify storefront. Any single match qualifies;
/// matching is case-insensitive.
const SHOPIFY_FINGERPRINTS: [&str; 6] = [
    r"cdn\.shopify\.com",
    r"shopify\.com/checkout",
    r"Shopify\.theme",
    r"shopify-payment-button",
    r"powered by shopify",
    r"_shopify_",
];

static FINGERPRINT_SET: LazyLock<RegexSet> = LazyLock::new(|| {
    RegexSetBuilder::new(SHOPIFY_FINGERPRINTS)
        .case_insensitive(true)
        .build()
        .expect("valid fingerprint regexes")
});

static TITLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<title[^>]*>(.*?)</title>").expect("valid regex"));
static META_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid regex"));
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

const FALLBACK_TITLE: &str = "Unknown";
const FALLBACK_DESCRIPTION: &str = "No description";

/// Fields extracted from a fingerprint-matched page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageClassification {
    pub title: String,
    pub description: String,
    pub emails: BTreeSet<String>,
}

/// Tests a page against the platform fingerprints and, on a match, extracts
/// its title, meta description, and contact emails.
///
/// Returns `None` when no fingerprint matches. A page missing its title or
/// description yields the `"Unknown"` / `"No description"` fallbacks.
#[must_use]
pub fn classify_page(html: &str) -> Option<PageClassification> {
    if !FINGERPRINT_SET.is_match(html) {
        return None;
    }

    Some(PageClassification {
        title: extract_title(html),
        description: extract_description(html),
        emails: extract_emails(html),
    })
}

fn extract_title(html: &str) -> String {
    TITLE_RE
        .captures(html)
        .and_then(|cap| cap.get(1).map(|m| strip_html(m.as_str())))
        .filter(|title| !title.is_empty())
        .unwrap_or_else(|| FALLBACK_TITLE.to_string())
}

fn extract_description(html: &str) -> String {
    find_meta_content(html, "name", "description")
        .map(|raw| decode_html(&raw))
        .filter(|description| !description.is_empty())
        .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string())
}

/// Finds the `content` attribute of the first `<meta>` tag whose `key_attr`
/// equals `key_value` (ASCII case-insensitive).
fn find_meta_content(html: &str, key_attr: &str, key_value: &str) -> Option<String> {
    META_TAG_RE.find_iter(html).find_map(|m| {
        let tag = m.as_str();
        let key = extract_attr(tag, key_attr)?;
        if key.eq_ignore_ascii_case(key_value) {
            extract_attr(tag, "content")
        } else {
            None
        }
    })
}

/// Pulls a quoted attribute value out of a single tag. Double and single
/// quoting are handled separately so values may contain the other quote kind
/// (descriptions routinely carry apostrophes).
fn extract_attr(tag: &str, attr: &str) -> Option<String> {
    let escaped = regex::escape(attr);
    let double = Regex::new(&format!(r#"(?is)\b{escaped}\s*=\s*"([^"]*)""#))
        .expect("valid attr regex");
    if let Some(cap) = double.captures(tag) {
        return cap.get(1).map(|m| m.as_str().trim().to_string());
    }

    let single =
        Regex::new(&format!(r"(?is)\b{escaped}\s*=\s*'([^']*)'")).expect("valid attr regex");
    single
        .captures(tag)
        .and_then(|cap| cap.get(1).map(|m| m.as_str().trim().to_string()))
}

fn strip_html(value: &str) -> String {
    decode_html(&TAG_RE.replace_all(value, ""))
}

fn decode_html(value: &str) -> String {
    value
        .replace("&amp;", "&")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ")
        .trim()
        .to_string()
}
