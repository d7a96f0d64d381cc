//! Contact email extraction.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Email shape shared by the raw-text scan and mailto validation.
const EMAIL_PATTERN: &str = r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}";

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid email regex"));
static EMAIL_EXACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!("^(?:{EMAIL_PATTERN})$")).expect("valid email regex"));
static MAILTO_HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*["']\s*mailto:([^"']*)["']"#).expect("valid mailto regex")
});

/// Collects contact emails from `mailto:` anchors and from addresses visible
/// anywhere in the raw HTML.
///
/// Mailto targets are taken without their `?subject=...` query suffix and
/// validated against the email shape. All addresses are lower-cased before
/// insertion, so mixed-case duplicates collapse to a single entry.
#[must_use]
pub fn extract_emails(html: &str) -> BTreeSet<String> {
    let mut emails = BTreeSet::new();

    for cap in MAILTO_HREF_RE.captures_iter(html) {
        if let Some(m) = cap.get(1) {
            let address = m.as_str().split('?').next().unwrap_or("").trim();
            if EMAIL_EXACT_RE.is_match(address) {
                emails.insert(address.to_lowercase());
            }
        }
    }

    for m in EMAIL_RE.find_iter(html) {
        emails.insert(m.as_str().to_lowercase());
    }

    emails
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn collects_mailto_and_visible_text_addresses() {
        let html = r#"<a href="mailto:Test@Example.com?subject=hi">mail</a> contact sales@x.no"#;
        let emails = extract_emails(html);
        assert_eq!(emails, set(&["sales@x.no", "test@example.com"]));
    }

    #[test]
    fn mixed_case_duplicates_collapse() {
        let html = "kontakt POST@butikk.no eller post@Butikk.no";
        let emails = extract_emails(html);
        assert_eq!(emails, set(&["post@butikk.no"]));
    }

    #[test]
    fn extraction_is_idempotent() {
        let html = r#"<a href='mailto:hei@fjell.no'>hei</a> support@fjell.no og hei@fjell.no"#;
        let first = extract_emails(html);
        let second = extract_emails(html);
        assert_eq!(first, second);
        assert_eq!(first, set(&["hei@fjell.no", "support@fjell.no"]));
    }

    #[test]
    fn mailto_query_suffix_is_stripped() {
        let html = r#"<a href="mailto:ordre@sko.no?subject=Ordre&body=Hei">bestill</a>"#;
        let emails = extract_emails(html);
        assert_eq!(emails, set(&["ordre@sko.no"]));
    }

    #[test]
    fn invalid_mailto_target_is_dropped() {
        let html = r#"<a href="mailto:ikke-en-adresse">kontakt</a>"#;
        let emails = extract_emails(html);
        assert!(emails.is_empty(), "got: {emails:?}");
    }

    #[test]
    fn no_addresses_yields_empty_set() {
        let html = "<html><body>ingen kontaktinfo her</body></html>";
        assert!(extract_emails(html).is_empty());
    }
}
