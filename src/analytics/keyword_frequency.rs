//! Keyword frequency aggregation
//!
//! Collapses a batch of normalized items into one record per distinct keyword:
//! - total mentions and summed popularity score
//! - per-source mention counts
//! - an hourly histogram keyed by `YYYY-MM-DDTHH`
//! - first/last seen timestamps

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use crate::models::{Category, NormalizedItem, Source};

/// Aggregated mention statistics for a single keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordFrequency {
    pub keyword: String,

    /// Category of the item that first introduced the keyword
    pub category: Category,

    pub total_mentions: u64,

    /// Sum of contributing items' popularity scores
    pub total_score: f64,

    /// Mentions per source, always sums to `total_mentions`
    pub source_breakdown: BTreeMap<Source, u64>,

    /// Mentions per hour bucket (`YYYY-MM-DDTHH`)
    pub hourly_buckets: BTreeMap<String, u64>,

    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

impl KeywordFrequency {
    fn new(keyword: &str, category: Category, seen: DateTime<Utc>) -> Self {
        Self {
            keyword: keyword.to_string(),
            category,
            total_mentions: 0,
            total_score: 0.0,
            source_breakdown: BTreeMap::new(),
            hourly_buckets: BTreeMap::new(),
            first_seen: seen,
            last_seen: seen,
        }
    }

    fn record(&mut self, item: &NormalizedItem, hour_key: &str) {
        self.total_mentions += 1;
        self.total_score += item.score;
        *self.source_breakdown.entry(item.source).or_insert(0) += 1;
        *self.hourly_buckets.entry(hour_key.to_string()).or_insert(0) += 1;

        if item.collected_at < self.first_seen {
            self.first_seen = item.collected_at;
        }
        if item.collected_at > self.last_seen {
            self.last_seen = item.collected_at;
        }
    }

    /// Number of distinct sources that mentioned the keyword
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.source_breakdown.len()
    }

    /// Mentions contributed by one source (0 when absent)
    #[must_use]
    pub fn mentions_from(&self, source: Source) -> u64 {
        self.source_breakdown.get(&source).copied().unwrap_or(0)
    }
}

/// Hour bucket key for a timestamp (`"2025-06-01T14"`)
#[must_use]
pub fn hour_bucket(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%dT%H").to_string()
}

/// Aggregate items into per-keyword frequency records.
///
/// Records are returned in the order their keyword was first encountered.
/// Items without keywords contribute nothing.
#[must_use]
pub fn aggregate_keywords(items: &[NormalizedItem]) -> Vec<KeywordFrequency> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut frequencies: Vec<KeywordFrequency> = Vec::new();

    for item in items {
        let hour_key = hour_bucket(&item.collected_at);

        for keyword in &item.keywords {
            let slot = match index.get(keyword.as_str()) {
                Some(&slot) => slot,
                None => {
                    frequencies.push(KeywordFrequency::new(
                        keyword,
                        item.category,
                        item.collected_at,
                    ));
                    index.insert(keyword.clone(), frequencies.len() - 1);
                    frequencies.len() - 1
                }
            };

            frequencies[slot].record(item, &hour_key);
        }
    }

    frequencies
}

/// Top keywords by mention count, ties broken by summed score
#[must_use]
pub fn top_by_mentions(frequencies: &[KeywordFrequency], limit: usize) -> Vec<KeywordFrequency> {
    let mut sorted = frequencies.to_vec();
    sorted.sort_by(|a, b| {
        b.total_mentions.cmp(&a.total_mentions).then_with(|| {
            b.total_score
                .partial_cmp(&a.total_score)
                .unwrap_or(Ordering::Equal)
        })
    });
    sorted.truncate(limit);
    sorted
}

/// Keywords whose (first-contributor) category matches
#[must_use]
pub fn filter_by_category(
    frequencies: &[KeywordFrequency],
    category: Category,
) -> Vec<KeywordFrequency> {
    frequencies
        .iter()
        .filter(|f| f.category == category)
        .cloned()
        .collect()
}

/// Keywords mentioned at least once by `source`
#[must_use]
pub fn filter_by_source(frequencies: &[KeywordFrequency], source: Source) -> Vec<KeywordFrequency> {
    frequencies
        .iter()
        .filter(|f| f.mentions_from(source) > 0)
        .cloned()
        .collect()
}
