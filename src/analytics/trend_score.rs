//! Multi-factor trend scoring
//!
//! A keyword's score combines three parts:
//! - mention score: `log2(mentions + 1) * 10`
//! - source quality: mentions per source weighted by [`Source::weight`]
//! - cross-source bonus: source quality scaled by a table indexed by source count
//!
//! Velocity compares the mention count with an optional previous period.
//! Every numeric output is rounded to two decimals so runs are reproducible.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use super::keyword_frequency::KeywordFrequency;
use super::round_to;
use crate::models::{Category, Source};

/// Cross-source multiplier indexed by number of sources
const CROSS_SOURCE_MULTIPLIER: [f64; 7] = [1.0, 1.0, 1.2, 1.5, 2.0, 2.5, 3.0];

/// Multiplier for seven or more sources
const MAX_CROSS_SOURCE_MULTIPLIER: f64 = 3.5;

/// Minimum number of sources for a keyword to count as spreading
pub const SPREADING_MIN_SOURCES: usize = 3;

/// Velocity assigned to a keyword with no previous mentions
pub const NEW_KEYWORD_VELOCITY: f64 = 100.0;

/// Composite score for one keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendScore {
    pub keyword: String,
    pub category: Category,

    /// `mention_score + source_quality_score + cross_source_score`
    pub score: f64,

    pub mention_score: f64,
    pub source_quality_score: f64,
    pub cross_source_score: f64,

    /// Distinct sources that mentioned the keyword
    pub source_count: usize,

    /// Percent change against the previous period
    pub velocity: f64,

    /// `source_count >= 3`
    pub is_spreading: bool,
}

impl TrendScore {
    /// All-zero score, used when a frequency record has no computed score
    #[must_use]
    pub fn zeroed(keyword: &str, category: Category) -> Self {
        Self {
            keyword: keyword.to_string(),
            category,
            score: 0.0,
            mention_score: 0.0,
            source_quality_score: 0.0,
            cross_source_score: 0.0,
            source_count: 0,
            velocity: 0.0,
            is_spreading: false,
        }
    }
}

/// Hourly point of a time-series view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourlyCount {
    pub hour: String,
    pub count: u64,
}

/// Daily point of a time-series view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCount {
    pub date: String,
    pub count: u64,
}

/// Mentions contributed by one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceCount {
    pub source: Source,
    pub count: u64,
}

/// Time-series presentation of a keyword
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeywordTrendView {
    pub keyword: String,
    pub category: Category,
    /// Chronological hourly histogram
    pub hourly_mentions: Vec<HourlyCount>,
    /// Chronological daily histogram summed from the hourly one
    pub daily_mentions: Vec<DailyCount>,
    pub sources: Vec<SourceCount>,
    pub velocity: f64,
    pub total_mentions: u64,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
}

/// Ranked hot keyword entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotKeyword {
    pub keyword: String,
    pub category: Category,
    pub velocity: f64,
    pub mentions: u64,
    pub sources: Vec<Source>,
    /// 1-based position
    pub rank: usize,
}

/// Cross-source multiplier for a given number of sources.
///
/// Zero and one source yield 1.0 (no bonus); seven or more clamp to 3.5.
#[must_use]
pub fn cross_source_multiplier(source_count: usize) -> f64 {
    CROSS_SOURCE_MULTIPLIER
        .get(source_count)
        .copied()
        .unwrap_or(MAX_CROSS_SOURCE_MULTIPLIER)
}

/// Percent change from `previous` to `current`, unrounded.
///
/// A keyword with no previous mentions but some current ones counts as
/// 100% growth; no data at all yields 0.
#[must_use]
pub fn velocity(current: u64, previous: u64) -> f64 {
    if previous > 0 {
        (current as f64 - previous as f64) / previous as f64 * 100.0
    } else if current > 0 {
        NEW_KEYWORD_VELOCITY
    } else {
        0.0
    }
}

/// Score every frequency record, optionally against a previous period
#[must_use]
pub fn score_trends(
    frequencies: &[KeywordFrequency],
    previous: Option<&[KeywordFrequency]>,
) -> Vec<TrendScore> {
    let previous_mentions: HashMap<&str, u64> = previous
        .unwrap_or_default()
        .iter()
        .map(|f| (f.keyword.as_str(), f.total_mentions))
        .collect();

    frequencies
        .iter()
        .map(|freq| {
            let prev = previous_mentions
                .get(freq.keyword.as_str())
                .copied()
                .unwrap_or(0);
            score_one(freq, prev)
        })
        .collect()
}

fn score_one(freq: &KeywordFrequency, previous_mentions: u64) -> TrendScore {
    let mention_score = ((freq.total_mentions + 1) as f64).log2() * 10.0;

    let source_quality_score: f64 = freq
        .source_breakdown
        .iter()
        .map(|(source, &count)| count as f64 * source.weight())
        .sum();

    let source_count = freq.source_count();
    let cross_source_score = source_quality_score * (cross_source_multiplier(source_count) - 1.0);

    let mention_score = round_to(mention_score, 2);
    let source_quality_score = round_to(source_quality_score, 2);
    let cross_source_score = round_to(cross_source_score, 2);

    TrendScore {
        keyword: freq.keyword.clone(),
        category: freq.category,
        score: round_to(mention_score + source_quality_score + cross_source_score, 2),
        mention_score,
        source_quality_score,
        cross_source_score,
        source_count,
        velocity: round_to(velocity(freq.total_mentions, previous_mentions), 2),
        is_spreading: source_count >= SPREADING_MIN_SOURCES,
    }
}

/// Sort scores descending; equal scores keep their input order
#[must_use]
pub fn rank_by_score(scores: &[TrendScore]) -> Vec<TrendScore> {
    let mut ranked = scores.to_vec();
    ranked.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    ranked
}

/// Build the time-series view of one keyword
#[must_use]
pub fn to_trend_view(freq: &KeywordFrequency, score: &TrendScore) -> KeywordTrendView {
    // BTreeMap keys are already in chronological order
    let hourly_mentions: Vec<HourlyCount> = freq
        .hourly_buckets
        .iter()
        .map(|(hour, &count)| HourlyCount {
            hour: hour.clone(),
            count,
        })
        .collect();

    let daily_mentions = daily_from_hourly(&hourly_mentions);

    let sources = freq
        .source_breakdown
        .iter()
        .map(|(&source, &count)| SourceCount { source, count })
        .collect();

    KeywordTrendView {
        keyword: freq.keyword.clone(),
        category: freq.category,
        hourly_mentions,
        daily_mentions,
        sources,
        velocity: score.velocity,
        total_mentions: freq.total_mentions,
        first_seen: freq.first_seen,
        last_seen: freq.last_seen,
    }
}

/// Top `limit` keywords by score with their mentions and sources attached
#[must_use]
pub fn to_hot_keywords(
    scores: &[TrendScore],
    frequencies: &[KeywordFrequency],
    limit: usize,
) -> Vec<HotKeyword> {
    let by_keyword: HashMap<&str, &KeywordFrequency> = frequencies
        .iter()
        .map(|f| (f.keyword.as_str(), f))
        .collect();

    rank_by_score(scores)
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(idx, score)| {
            let freq = by_keyword.get(score.keyword.as_str());
            HotKeyword {
                mentions: freq.map_or(0, |f| f.total_mentions),
                sources: freq
                    .map(|f| f.source_breakdown.keys().copied().collect())
                    .unwrap_or_default(),
                keyword: score.keyword,
                category: score.category,
                velocity: score.velocity,
                rank: idx + 1,
            }
        })
        .collect()
}

fn daily_from_hourly(hourly: &[HourlyCount]) -> Vec<DailyCount> {
    let mut daily: BTreeMap<&str, u64> = BTreeMap::new();
    for point in hourly {
        let date = point.hour.get(..10).unwrap_or(&point.hour);
        *daily.entry(date).or_insert(0) += point.count;
    }

    daily
        .into_iter()
        .map(|(date, count)| DailyCount {
            date: date.to_string(),
            count,
        })
        .collect()
}
