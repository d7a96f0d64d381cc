//! Search phase: paginated Custom Search requests across the query list,
//! deduplicating result URLs as they arrive.

use std::collections::HashSet;
use std::time::Duration;

use storescout_cse::{CseClient, MAX_START, PAGE_SIZE};

/// Collect candidate storefront URLs for every query in `queries`, in
/// first-seen order.
///
/// Pagination within a query advances ten results at a time and stops when a
/// page comes back short (the query is exhausted), when the API's result
/// offset cap is reached, or when `candidate_budget` URLs have been collected
/// overall. The first occurrence of a URL wins; later duplicates within and
/// across queries are dropped silently. A pause of `page_delay_ms` separates
/// consecutive page requests.
///
/// A query whose request fails is logged and abandoned; the remaining
/// queries still run. Search failures are never fatal to the scan.
pub(crate) async fn discover_urls(
    search: &CseClient,
    queries: &[String],
    candidate_budget: usize,
    page_delay_ms: u64,
) -> Vec<String> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut urls: Vec<String> = Vec::new();

    'queries: for query in queries {
        tracing::info!(query = %query, "searching");
        let mut start: u32 = 1;

        loop {
            if start > 1 && page_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(page_delay_ms)).await;
            }

            let page = match search.search_page(query, start).await {
                Ok(page) => page,
                Err(e) => {
                    tracing::warn!(query = %query, error = %e, "search failed; abandoning query");
                    break;
                }
            };

            let item_count = page.items.len();
            for item in page.items {
                if item.link.is_empty() {
                    tracing::debug!(query = %query, "skipping result without a link");
                    continue;
                }
                if seen.insert(item.link.clone()) {
                    urls.push(item.link);
                }
                if urls.len() >= candidate_budget {
                    tracing::info!(
                        candidates = urls.len(),
                        "candidate budget reached; ending search phase"
                    );
                    break 'queries;
                }
            }

            if item_count < PAGE_SIZE {
                tracing::debug!(query = %query, items = item_count, "query exhausted");
                break;
            }
            start += PAGE_SIZE as u32;
            if start >= MAX_START {
                tracing::debug!(query = %query, "result offset cap reached");
                break;
            }
        }
    }

    urls
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
#[path = "discover_test.rs"]
mod tests;
