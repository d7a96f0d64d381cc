//! Verification phase: drives candidate URLs through the prober in
//! fixed-size concurrent batches with a pause between batches.

use std::time::Duration;

use futures::future::join_all;
use storescout_probe::{ProbeClient, StoreRecord};

/// Caps and pacing for a verification run.
pub(crate) struct RunLimits {
    pub store_limit: usize,
    pub max_checks: usize,
    pub batch_size: usize,
    pub batch_delay_ms: u64,
}

/// Aggregated result of the verification phase: how many URLs were checked,
/// the records that verified, and which cap (if any) ended the run.
pub(crate) struct VerifyOutcome {
    pub checked: usize,
    pub stores: Vec<StoreRecord>,
    pub store_limit_reached: bool,
    pub max_checks_reached: bool,
}

/// Verify `urls` in batches of `limits.batch_size`, stopping once
/// `store_limit` records have verified or `max_checks` URLs have been
/// checked.
///
/// URLs within a batch are checked concurrently; a failed check is an absent
/// result, never an abort. A batch that would cross the check cap is
/// shortened so the checked count lands exactly on it, and the store list is
/// truncated to `store_limit` when the final batch overshoots.
pub(crate) async fn verify_all(
    prober: &ProbeClient,
    urls: &[String],
    limits: &RunLimits,
) -> VerifyOutcome {
    let batch_size = limits.batch_size.max(1);
    let mut checked: usize = 0;
    let mut stores: Vec<StoreRecord> = Vec::new();
    let mut remaining = urls;

    while !remaining.is_empty()
        && checked < limits.max_checks
        && stores.len() < limits.store_limit
    {
        if checked > 0 && limits.batch_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(limits.batch_delay_ms)).await;
        }

        let take = batch_size
            .min(remaining.len())
            .min(limits.max_checks - checked);
        let (batch, rest) = remaining.split_at(take);
        remaining = rest;

        tracing::debug!(batch = batch.len(), checked, "verifying batch");
        let results = join_all(batch.iter().map(|url| prober.verify_store(url))).await;
        checked += batch.len();
        stores.extend(results.into_iter().flatten());
    }

    stores.truncate(limits.store_limit);
    let store_limit_reached = stores.len() >= limits.store_limit;
    let max_checks_reached = checked >= limits.max_checks;

    if store_limit_reached || max_checks_reached {
        tracing::info!(
            checked,
            stores = stores.len(),
            store_limit_reached,
            max_checks_reached,
            "verification stopped at a run cap"
        );
    }

    VerifyOutcome {
        checked,
        stores,
        store_limit_reached,
        max_checks_reached,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "verify_test.rs"]
mod tests;
