//! Run outputs: the CSV export, the JSON run report, and the console
//! summary.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use serde::Serialize;
use storescout_probe::StoreRecord;

use super::verify::{RunLimits, VerifyOutcome};

const CSV_HEADER: [&str; 6] = [
    "url",
    "title",
    "description",
    "emails",
    "verified",
    "discovery_date",
];

/// Summary document written alongside the CSV export: the caps the run was
/// configured with, whether either was hit, and the full store list.
#[derive(Debug, Serialize)]
pub(crate) struct RunReport {
    pub total_stores_found: usize,
    pub total_urls_checked: usize,
    pub store_limit: usize,
    pub max_checks_limit: usize,
    pub store_limit_reached: bool,
    pub max_checks_reached: bool,
    pub scan_date: String,
    pub stores: Vec<StoreRecord>,
}

impl RunReport {
    /// Build the report for a finished verification phase, stamped with
    /// today's UTC date.
    pub(crate) fn from_outcome(outcome: VerifyOutcome, limits: &RunLimits) -> Self {
        Self {
            total_stores_found: outcome.stores.len(),
            total_urls_checked: outcome.checked,
            store_limit: limits.store_limit,
            max_checks_limit: limits.max_checks,
            store_limit_reached: outcome.store_limit_reached,
            max_checks_reached: outcome.max_checks_reached,
            scan_date: Utc::now().format("%Y-%m-%d").to_string(),
            stores: outcome.stores,
        }
    }
}

/// Render `records` as CSV with a header row. Fields containing a comma,
/// quote, or line break are quoted, with embedded quotes doubled.
pub(crate) fn csv_string(records: &[StoreRecord]) -> String {
    let mut buf: Vec<u8> = Vec::new();
    let header: Vec<String> = CSV_HEADER.iter().map(|h| (*h).to_string()).collect();

    // Writes into a Vec<u8> cannot fail.
    let _ = write_row(&mut buf, &header);
    for record in records {
        let _ = write_row(&mut buf, &record_row(record));
    }

    match String::from_utf8(buf) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(&e.into_bytes()).into_owned(),
    }
}

fn record_row(record: &StoreRecord) -> Vec<String> {
    vec![
        record.url.clone(),
        record.title.clone(),
        record.description.clone(),
        record.emails.join(", "),
        record.verified.to_string(),
        record.discovery_date.clone(),
    ]
}

fn needs_quotes(field: &str) -> bool {
    field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r')
}

fn write_row<W: Write>(w: &mut W, row: &[String]) -> io::Result<()> {
    let mut first = true;
    for cell in row {
        if first {
            first = false;
        } else {
            write!(w, ",")?;
        }
        if needs_quotes(cell) {
            write!(w, "\"{}\"", cell.replace('"', "\"\""))?;
        } else {
            write!(w, "{cell}")?;
        }
    }
    writeln!(w)
}

/// Write the CSV export to `path`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
pub(crate) fn write_csv(path: &Path, records: &[StoreRecord]) -> anyhow::Result<()> {
    fs::write(path, csv_string(records))
        .with_context(|| format!("failed to write csv export to {}", path.display()))
}

/// Write the pretty-printed JSON run report to `path`.
///
/// # Errors
///
/// Returns an error if the report cannot be serialized or the file cannot be
/// written.
pub(crate) fn write_report(path: &Path, report: &RunReport) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report).context("failed to serialize run report")?;
    fs::write(path, json)
        .with_context(|| format!("failed to write run report to {}", path.display()))
}

/// Print the end-of-run summary: totals plus one line per store, with its
/// contact emails when any were found.
pub(crate) fn print_summary(report: &RunReport) {
    println!("\nScan completed:");
    println!("- URLs checked: {}", report.total_urls_checked);
    println!("- Stores found: {}", report.total_stores_found);
    for store in &report.stores {
        println!("- {}: {}", store.url, store.title);
        if !store.emails.is_empty() {
            println!("  Emails: {}", store.emails.join(", "));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "export_test.rs"]
mod tests;
