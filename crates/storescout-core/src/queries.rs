use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::ConfigError;

/// Built-in search query templates, in issue order.
///
/// Each pairs the `.no` national-domain restriction with a Shopify signal:
/// footer branding, asset/checkout hostnames, or a Norwegian commerce term
/// (nettbutikk, Vipps, Klarna) alongside the platform name.
pub const DEFAULT_QUERIES: [&str; 7] = [
    r#"site:.no "Powered by Shopify""#,
    "site:.no inurl:products shopify.com",
    "site:.no inurl:collections cdn.shopify.com",
    r#"site:.no "Shopify online store""#,
    "site:.no nettbutikk shopify",
    "site:.no vipps shopify",
    "site:.no klarna shopify",
];

#[derive(Debug, Deserialize)]
pub struct QueriesFile {
    pub queries: Vec<String>,
}

/// The built-in query templates as owned strings.
#[must_use]
pub fn default_queries() -> Vec<String> {
    DEFAULT_QUERIES.iter().map(|q| (*q).to_string()).collect()
}

/// Load and validate a query-template list from a YAML file.
///
/// The file replaces the built-in templates wholesale:
///
/// ```yaml
/// queries:
///   - 'site:.no "Powered by Shopify"'
///   - 'site:.no nettbutikk shopify'
/// ```
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_queries(path: &Path) -> Result<QueriesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::QueriesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let queries_file: QueriesFile =
        serde_yaml::from_str(&content).map_err(ConfigError::QueriesFileParse)?;

    validate_queries(&queries_file)?;

    Ok(queries_file)
}

fn validate_queries(queries_file: &QueriesFile) -> Result<(), ConfigError> {
    if queries_file.queries.is_empty() {
        return Err(ConfigError::Validation(
            "queries file must list at least one query".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for query in &queries_file.queries {
        if query.trim().is_empty() {
            return Err(ConfigError::Validation(
                "query must be non-empty".to_string(),
            ));
        }

        if !seen.insert(query.trim().to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate query: '{query}'"
            )));
        }
    }

    Ok(())
}
