//! Analysis pipeline orchestration
//!
//! ```text
//!  current items ──▶ aggregate ──┬──▶ score ──┬──▶ trend views / hot keywords
//!                                │            ├──▶ surge alerts ◀── previous baseline
//!  previous items ─▶ aggregate ──┘            │
//!                                ├──▶ spreads ┴──▶ viral trends
//!                                └──▶ source correlations
//! ```
//!
//! Every run is a pure function of its inputs apart from `meta.analyzed_at`
//! and `meta.duration_ms`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;

use super::cross_source::{
    correlate_sources, detect_spreads, viral_trends, CrossSourceSpread, SourceCorrelation,
    ViralTrend, DEFAULT_MIN_SOURCES,
};
use super::keyword_frequency::{aggregate_keywords, top_by_mentions, KeywordFrequency};
use super::surge::{build_previous_mention_map, detect_surges, SurgeAlert, SurgeOverrides};
use super::trend_score::{
    rank_by_score, score_trends, to_hot_keywords, to_trend_view, HotKeyword, KeywordTrendView,
    TrendScore,
};
use crate::models::NormalizedItem;

/// Tunables for one analysis run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    /// Keywords kept in `top_frequencies` and `keyword_trends`
    pub top_keywords_limit: usize,

    /// Entries in `hot_keywords`
    pub hot_keywords_limit: usize,

    /// Entries in `viral_trends`
    pub viral_limit: usize,

    /// Minimum sources for a cross-source spread
    pub min_cross_sources: usize,

    /// Surge threshold overrides
    pub surge: SurgeOverrides,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            top_keywords_limit: 50,
            hot_keywords_limit: 20,
            viral_limit: 10,
            min_cross_sources: DEFAULT_MIN_SOURCES,
            surge: SurgeOverrides::default(),
        }
    }
}

/// Run metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMeta {
    pub total_items: usize,
    pub unique_keywords: usize,
    pub analyzed_at: DateTime<Utc>,
    pub duration_ms: u64,
}

/// Everything one analysis run produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Every keyword in the current batch
    pub frequencies: Vec<KeywordFrequency>,
    /// Most-mentioned keywords, limited
    pub top_frequencies: Vec<KeywordFrequency>,
    /// All scores, ranked
    pub trend_scores: Vec<TrendScore>,
    /// Time-series views of the top keywords
    pub keyword_trends: Vec<KeywordTrendView>,
    pub hot_keywords: Vec<HotKeyword>,
    pub surge_alerts: Vec<SurgeAlert>,
    pub cross_source_spreads: Vec<CrossSourceSpread>,
    pub source_correlations: Vec<SourceCorrelation>,
    pub viral_trends: Vec<ViralTrend>,
    pub meta: AnalysisMeta,
}

/// Run the full analysis over the current batch and an optional previous one.
///
/// An empty current batch yields an empty but well-formed result.
#[must_use]
pub fn run_analysis(
    current: &[NormalizedItem],
    previous: Option<&[NormalizedItem]>,
    options: &AnalysisOptions,
) -> AnalysisResult {
    let start = Instant::now();
    let analyzed_at = Utc::now();

    // 1) keyword frequencies
    let frequencies = aggregate_keywords(current);
    let top_frequencies = top_by_mentions(&frequencies, options.top_keywords_limit);
    let previous_frequencies = previous.map(aggregate_keywords);

    tracing::debug!(
        items = current.len(),
        keywords = frequencies.len(),
        previous_keywords = previous_frequencies.as_ref().map(Vec::len),
        "Aggregated keyword frequencies"
    );

    // 2) trend scores
    let trend_scores = rank_by_score(&score_trends(
        &frequencies,
        previous_frequencies.as_deref(),
    ));

    // 3) presentation views
    let score_by_keyword: HashMap<&str, &TrendScore> = trend_scores
        .iter()
        .map(|s| (s.keyword.as_str(), s))
        .collect();
    let keyword_trends: Vec<KeywordTrendView> = top_frequencies
        .iter()
        .map(|freq| match score_by_keyword.get(freq.keyword.as_str()) {
            Some(score) => to_trend_view(freq, score),
            None => to_trend_view(freq, &TrendScore::zeroed(&freq.keyword, freq.category)),
        })
        .collect();
    let hot_keywords = to_hot_keywords(&trend_scores, &frequencies, options.hot_keywords_limit);

    // 4) surges
    let previous_mentions = previous_frequencies
        .as_deref()
        .map(build_previous_mention_map)
        .unwrap_or_default();
    let surge_alerts = detect_surges(
        &trend_scores,
        &previous_mentions,
        &options.surge.resolve(),
        analyzed_at,
    );

    // 5) cross-source analysis
    let cross_source_spreads = detect_spreads(&frequencies, options.min_cross_sources);
    let source_correlations = correlate_sources(&frequencies);
    let viral = viral_trends(&cross_source_spreads, &trend_scores, options.viral_limit);

    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    tracing::info!(
        total_items = current.len(),
        unique_keywords = frequencies.len(),
        surge_alerts = surge_alerts.len(),
        spreads = cross_source_spreads.len(),
        duration_ms,
        "Trend analysis complete"
    );

    AnalysisResult {
        meta: AnalysisMeta {
            total_items: current.len(),
            unique_keywords: frequencies.len(),
            analyzed_at,
            duration_ms,
        },
        frequencies,
        top_frequencies,
        trend_scores,
        keyword_trends,
        hot_keywords,
        surge_alerts,
        cross_source_spreads,
        source_correlations,
        viral_trends: viral,
    }
}
