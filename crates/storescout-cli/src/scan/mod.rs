//! Scan command handler for the CLI.
//!
//! A scan runs as two strictly sequential phases: the search phase collects
//! candidate URLs from the Custom Search API, then the verification phase
//! checks each candidate for platform fingerprints in concurrent batches.
//! Per-URL and per-query failures are logged and skipped rather than
//! propagated so a single bad candidate does not abort the full run.

mod discover;
mod export;
mod verify;

use std::path::Path;

use storescout_core::{default_queries, load_queries, AppConfig, ConfigError};
use storescout_cse::CseClient;
use storescout_probe::ProbeClient;

/// Timeout for individual search API requests. Candidate page fetches use the
/// separately configured `fetch_timeout_secs`.
const SEARCH_TIMEOUT_SECS: u64 = 10;

/// The query templates a scan will run: the YAML override file when one is
/// configured, the built-in list otherwise.
///
/// # Errors
///
/// Returns `ConfigError` if the override file cannot be read or fails
/// validation.
pub(crate) fn active_queries(config: &AppConfig) -> Result<Vec<String>, ConfigError> {
    match &config.queries_path {
        Some(path) => Ok(load_queries(path)?.queries),
        None => Ok(default_queries()),
    }
}

/// Discover candidate storefronts, verify them, and write the CSV export and
/// JSON run report.
///
/// When `dry_run` is `true` the function prints the queries and limits the
/// scan would use and returns without touching the network.
///
/// # Errors
///
/// Returns an error if the query list cannot be loaded, the Google
/// credentials are missing, an HTTP client cannot be constructed, or an
/// output file cannot be written. Search and verification failures for
/// individual queries or URLs are logged and skipped, not propagated.
pub(crate) async fn run_scan(
    config: &AppConfig,
    store_limit: usize,
    max_checks: usize,
    csv_path: &Path,
    report_path: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    let queries = active_queries(config)?;

    if dry_run {
        println!(
            "dry-run: would run {} search queries (store_limit={store_limit}, max_checks={max_checks}):",
            queries.len()
        );
        for query in &queries {
            println!("  {query}");
        }
        return Ok(());
    }

    let (api_key, cse_id) = config.google_credentials()?;
    let search = CseClient::new(&api_key, &cse_id, SEARCH_TIMEOUT_SECS)?;

    tracing::info!(
        queries = queries.len(),
        store_limit,
        max_checks,
        "starting storefront scan"
    );

    let urls = discover::discover_urls(&search, &queries, max_checks, config.search_delay_ms).await;
    tracing::info!(candidates = urls.len(), "search phase complete");

    let prober = ProbeClient::new(config.fetch_timeout_secs, &config.user_agent)?;
    let limits = verify::RunLimits {
        store_limit,
        max_checks,
        batch_size: config.verify_batch_size,
        batch_delay_ms: config.verify_batch_delay_ms,
    };
    let outcome = verify::verify_all(&prober, &urls, &limits).await;

    if outcome.stores.is_empty() {
        tracing::warn!(
            urls_checked = outcome.checked,
            "no storefronts verified; skipping export"
        );
        println!(
            "no storefronts verified across {} checked urls; nothing exported",
            outcome.checked
        );
        return Ok(());
    }

    export::write_csv(csv_path, &outcome.stores)?;
    let report = export::RunReport::from_outcome(outcome, &limits);
    export::write_report(report_path, &report)?;

    tracing::info!(
        stores = report.total_stores_found,
        urls_checked = report.total_urls_checked,
        "scan complete"
    );
    println!(
        "wrote {} stores to {}",
        report.total_stores_found,
        csv_path.display()
    );
    println!("wrote run report to {}", report_path.display());
    export::print_summary(&report);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "scan_test.rs"]
mod tests;
