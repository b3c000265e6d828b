//! Settle-all collection run
//!
//! Every collector runs concurrently under its own timeout. A failing or
//! slow collector only loses its own items; the merged list is then
//! de-duplicated by URL, first occurrence wins.

use futures::future::join_all;
use std::collections::HashSet;
use std::time::{Duration, Instant};

use super::{CollectionResult, CollectionStatus, Collector};
use crate::error::CollectError;
use crate::models::NormalizedItem;

/// Merged items plus one report per collector, in collector order
#[derive(Debug, Clone, Default)]
pub struct CollectionOutcome {
    pub items: Vec<NormalizedItem>,
    pub results: Vec<CollectionResult>,
}

impl CollectionOutcome {
    /// Number of collectors that failed
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.results.iter().filter(|r| !r.is_success()).count()
    }
}

/// Run all collectors, keep successes, de-duplicate by URL
pub async fn run_collection(collectors: &[Box<dyn Collector>], timeout: Duration) -> CollectionOutcome {
    let runs = collectors
        .iter()
        .map(|collector| collect_one(collector.as_ref(), timeout));
    let settled = join_all(runs).await;

    let mut items = Vec::new();
    let mut results = Vec::with_capacity(settled.len());
    for (collected, result) in settled {
        items.extend(collected);
        results.push(result);
    }

    let before = items.len();
    let items = dedupe_by_url(items);

    tracing::info!(
        collectors = collectors.len(),
        failed = results.iter().filter(|r| !r.is_success()).count(),
        items = items.len(),
        duplicates = before - items.len(),
        "Collection finished"
    );

    CollectionOutcome { items, results }
}

async fn collect_one(
    collector: &dyn Collector,
    timeout: Duration,
) -> (Vec<NormalizedItem>, CollectionResult) {
    let source = collector.source();
    let start = Instant::now();

    let outcome = match tokio::time::timeout(timeout, collector.collect()).await {
        Ok(result) => result,
        Err(_) => Err(CollectError::Timeout(timeout)),
    };
    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    match outcome {
        Ok(raw) => {
            let items = collector.normalize(raw);
            tracing::debug!(
                source = %source,
                tier = collector.tier(),
                items = items.len(),
                duration_ms,
                "Collector succeeded"
            );
            let result = CollectionResult {
                source,
                status: CollectionStatus::Success,
                items_count: items.len(),
                duration_ms,
                error: None,
            };
            (items, result)
        }
        Err(e) => {
            tracing::warn!(source = %source, error = %e, duration_ms, "Collector failed");
            let result = CollectionResult {
                source,
                status: CollectionStatus::Error,
                items_count: 0,
                duration_ms,
                error: Some(e.to_string()),
            };
            (Vec::new(), result)
        }
    }
}

/// Drop items whose URL (case-insensitive) was already seen
#[must_use]
pub fn dedupe_by_url(items: Vec<NormalizedItem>) -> Vec<NormalizedItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.url.to_lowercase()))
        .collect()
}
