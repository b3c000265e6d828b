//! Analytics module: keyword aggregation, trend scoring, surge detection
//! and cross-source spread analysis

pub mod cross_source;
pub mod engine;
pub mod keyword_frequency;
pub mod surge;
pub mod trend_score;

pub use cross_source::{
    correlate_sources, detect_spreads, keyword_source_map, viral_trends, CrossSourceSpread,
    SourceCorrelation, SourceMentions, SourceShare, SpreadLevel, ViralTrend,
};
pub use engine::{run_analysis, AnalysisMeta, AnalysisOptions, AnalysisResult};
pub use keyword_frequency::{
    aggregate_keywords, filter_by_category, filter_by_source, hour_bucket, top_by_mentions,
    KeywordFrequency,
};
pub use surge::{
    build_previous_mention_map, detect_surges, SurgeAlert, SurgeConfig, SurgeLevel,
    SurgeOverrides,
};
pub use trend_score::{
    cross_source_multiplier, rank_by_score, score_trends, to_hot_keywords, to_trend_view,
    HotKeyword, KeywordTrendView, TrendScore,
};

/// Round to a fixed number of decimal places, halves toward positive infinity
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor + 0.5).floor() / factor
}
