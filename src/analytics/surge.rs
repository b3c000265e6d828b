//! Surge detection
//!
//! Compares each keyword's current mention volume with the previous period
//! and emits tiered alerts (spike / surge / explosion) for keywords that grow
//! fast enough, have enough mentions, and appear in enough sources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use super::keyword_frequency::KeywordFrequency;
use super::round_to;
use super::trend_score::{velocity, TrendScore};

/// Surge detection thresholds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurgeConfig {
    /// Minimum velocity (%) to be considered a surge
    pub velocity_threshold: f64,

    /// Minimum current mentions; fewer is treated as noise
    pub min_mentions: u64,

    /// Minimum distinct sources; single-source jumps are low confidence
    pub min_sources: usize,
}

impl Default for SurgeConfig {
    fn default() -> Self {
        Self {
            velocity_threshold: 50.0,
            min_mentions: 3,
            min_sources: 2,
        }
    }
}

/// Partial override of [`SurgeConfig`]; unset fields keep the defaults
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SurgeOverrides {
    pub velocity_threshold: Option<f64>,
    pub min_mentions: Option<u64>,
    pub min_sources: Option<usize>,
}

impl SurgeOverrides {
    /// Resolve against the default thresholds
    #[must_use]
    pub fn resolve(&self) -> SurgeConfig {
        let base = SurgeConfig::default();
        SurgeConfig {
            velocity_threshold: self.velocity_threshold.unwrap_or(base.velocity_threshold),
            min_mentions: self.min_mentions.unwrap_or(base.min_mentions),
            min_sources: self.min_sources.unwrap_or(base.min_sources),
        }
    }
}

/// Qualitative growth tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurgeLevel {
    /// 50% or more
    Spike,
    /// 200% or more
    Surge,
    /// 500% or more
    Explosion,
}

impl SurgeLevel {
    /// Classify a velocity, highest tier first
    #[must_use]
    pub fn from_velocity(velocity: f64) -> Self {
        if velocity >= 500.0 {
            Self::Explosion
        } else if velocity >= 200.0 {
            Self::Surge
        } else {
            Self::Spike
        }
    }

    /// Get string representation
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Spike => "spike",
            Self::Surge => "surge",
            Self::Explosion => "explosion",
        }
    }
}

/// Alert for a keyword whose volume jumped
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurgeAlert {
    pub keyword: String,
    pub level: SurgeLevel,
    pub velocity: f64,
    /// Mentions reconstructed from the mention score
    pub current_mentions: u64,
    pub previous_mentions: u64,
    pub source_count: usize,
    pub is_spreading: bool,
    pub trend_score: f64,
    pub detected_at: DateTime<Utc>,
}

/// Previous-period baseline: keyword to total mentions
#[must_use]
pub fn build_previous_mention_map(previous: &[KeywordFrequency]) -> HashMap<String, u64> {
    previous
        .iter()
        .map(|f| (f.keyword.clone(), f.total_mentions))
        .collect()
}

/// Invert `log2(n + 1) * 10` back to a mention count.
///
/// The result can drift from the raw count once the mention score has
/// been rounded; thresholds are evaluated on this value.
#[must_use]
pub fn mentions_from_score(mention_score: f64) -> u64 {
    if mention_score > 0.0 {
        (2f64.powf(mention_score / 10.0) - 1.0).round() as u64
    } else {
        0
    }
}

/// Detect surging keywords, sorted by trend score descending
#[must_use]
pub fn detect_surges(
    scores: &[TrendScore],
    previous_mentions: &HashMap<String, u64>,
    config: &SurgeConfig,
    detected_at: DateTime<Utc>,
) -> Vec<SurgeAlert> {
    let mut alerts: Vec<SurgeAlert> = scores
        .iter()
        .filter_map(|score| {
            let previous = previous_mentions.get(&score.keyword).copied().unwrap_or(0);
            let current = mentions_from_score(score.mention_score);
            let growth = velocity(current, previous);

            if growth < config.velocity_threshold
                || current < config.min_mentions
                || score.source_count < config.min_sources
            {
                return None;
            }

            let level = SurgeLevel::from_velocity(growth);
            tracing::debug!(
                keyword = %score.keyword,
                level = level.as_str(),
                velocity = growth,
                current,
                previous,
                "Surge detected"
            );

            Some(SurgeAlert {
                keyword: score.keyword.clone(),
                level,
                velocity: round_to(growth, 2),
                current_mentions: current,
                previous_mentions: previous,
                source_count: score.source_count,
                is_spreading: score.is_spreading,
                trend_score: score.score,
                detected_at,
            })
        })
        .collect();

    alerts.sort_by(|a, b| {
        b.trend_score
            .partial_cmp(&a.trend_score)
            .unwrap_or(Ordering::Equal)
    });

    tracing::debug!(
        candidates = scores.len(),
        alerts = alerts.len(),
        "Surge detection finished"
    );

    alerts
}
