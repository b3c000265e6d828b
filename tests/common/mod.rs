//! Common test utilities

use chrono::{DateTime, Duration, TimeZone, Utc};
use trendscope::models::{Category, NormalizedItem, Source};

/// Fixed collection time so runs are reproducible
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 9, 0, 0).unwrap()
}

/// Create an item from `source` carrying `keywords`
pub fn create_item(source: Source, keywords: &[&str]) -> NormalizedItem {
    create_item_at(source, keywords, 0)
}

/// Create an item collected `minutes` after the base time
pub fn create_item_at(source: Source, keywords: &[&str], minutes: i64) -> NormalizedItem {
    let collected_at = base_time() + Duration::minutes(minutes);
    NormalizedItem::new(
        source,
        format!("{} on {}", keywords.join(", "), source),
        format!("https://{}.example/{}", source, minutes),
        collected_at,
    )
    .with_keywords(keywords.iter().copied())
    .with_category(Category::Other)
    .with_score(10.0)
}

/// `n` items from `source`, each mentioning `keyword` once
#[allow(dead_code)]
pub fn repeat_item(source: Source, keyword: &str, n: usize) -> Vec<NormalizedItem> {
    (0..n)
        .map(|i| create_item_at(source, &[keyword], i as i64))
        .collect()
}
