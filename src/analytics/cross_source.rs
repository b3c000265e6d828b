//! Cross-source spread and correlation analysis
//!
//! This module provides functionality for:
//! - Detecting keywords that appear across several independent sources
//! - Jaccard similarity between the keyword sets of every source pair
//! - Per-keyword source share breakdown
//! - Viral ranking blending trend score with spread

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::keyword_frequency::KeywordFrequency;
use super::round_to;
use super::trend_score::TrendScore;
use crate::models::{Category, Source};

/// Default minimum number of sources for a spread
pub const DEFAULT_MIN_SOURCES: usize = 3;

/// How far a keyword has spread
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpreadLevel {
    Emerging,
    Growing,
    Viral,
}

impl SpreadLevel {
    /// Classify from source count and average mentions per source
    ///
    /// - 6+ sources averaging 3+ mentions: `Viral`
    /// - 4+ sources, or 5+ average mentions: `Growing`
    /// - otherwise: `Emerging`
    #[must_use]
    pub fn classify(source_count: usize, avg_mentions: f64) -> Self {
        if source_count >= 6 && avg_mentions >= 3.0 {
            Self::Viral
        } else if source_count >= 4 || avg_mentions >= 5.0 {
            Self::Growing
        } else {
            Self::Emerging
        }
    }
}

/// Mentions of a keyword at one source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceMentions {
    pub source: Source,
    pub mentions: u64,
}

/// A keyword present in enough sources to count as spreading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrossSourceSpread {
    pub keyword: String,
    pub category: Category,
    pub sources: Vec<SourceMentions>,
    pub source_count: usize,
    /// `source_count * (total_mentions / source_count)`
    pub spread_score: f64,
    pub spread_level: SpreadLevel,
}

/// Keyword-set similarity between two sources
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCorrelation {
    pub source_a: Source,
    pub source_b: Source,
    pub shared_keywords: usize,
    /// Jaccard similarity in `[0, 1]`, three decimals
    pub similarity: f64,
}

/// One source's share of a keyword's mentions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceShare {
    pub source: Source,
    pub mentions: u64,
    /// Whole-number percentage of the keyword's total mentions
    pub percentage: u32,
}

/// Spread record joined with its trend score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViralTrend {
    #[serde(flatten)]
    pub spread: CrossSourceSpread,
    pub trend_score: f64,
}

impl ViralTrend {
    fn weight(&self) -> f64 {
        self.trend_score * self.spread.spread_score
    }
}

/// Keywords seen in at least `min_sources` sources, by spread score descending
#[must_use]
pub fn detect_spreads(frequencies: &[KeywordFrequency], min_sources: usize) -> Vec<CrossSourceSpread> {
    let mut spreads: Vec<CrossSourceSpread> = frequencies
        .iter()
        .filter(|f| f.source_count() >= min_sources && f.source_count() > 0)
        .map(|f| {
            let source_count = f.source_count();
            let avg_mentions = f.total_mentions as f64 / source_count as f64;

            CrossSourceSpread {
                keyword: f.keyword.clone(),
                category: f.category,
                sources: f
                    .source_breakdown
                    .iter()
                    .map(|(&source, &mentions)| SourceMentions { source, mentions })
                    .collect(),
                source_count,
                spread_score: round_to(source_count as f64 * avg_mentions, 2),
                spread_level: SpreadLevel::classify(source_count, avg_mentions),
            }
        })
        .collect();

    spreads.sort_by(|a, b| {
        b.spread_score
            .partial_cmp(&a.spread_score)
            .unwrap_or(Ordering::Equal)
    });
    spreads
}

/// Jaccard similarity of every source pair sharing at least one keyword
#[must_use]
pub fn correlate_sources(frequencies: &[KeywordFrequency]) -> Vec<SourceCorrelation> {
    let mut keywords_by_source: BTreeMap<Source, BTreeSet<&str>> = BTreeMap::new();
    for freq in frequencies {
        for &source in freq.source_breakdown.keys() {
            keywords_by_source
                .entry(source)
                .or_default()
                .insert(freq.keyword.as_str());
        }
    }

    let sources: Vec<(Source, &BTreeSet<&str>)> = keywords_by_source
        .iter()
        .map(|(&source, set)| (source, set))
        .collect();
    let mut correlations = Vec::new();

    for (i, &(source_a, set_a)) in sources.iter().enumerate() {
        for &(source_b, set_b) in &sources[i + 1..] {
            let shared = set_a.intersection(set_b).count();
            if shared == 0 {
                continue;
            }

            let union = set_a.len() + set_b.len() - shared;
            let similarity = if union > 0 {
                round_to(shared as f64 / union as f64, 3)
            } else {
                0.0
            };

            correlations.push(SourceCorrelation {
                source_a,
                source_b,
                shared_keywords: shared,
                similarity,
            });
        }
    }

    correlations.sort_by(|a, b| {
        b.similarity
            .partial_cmp(&a.similarity)
            .unwrap_or(Ordering::Equal)
    });
    correlations
}

/// Per-source share of one keyword, most mentions first.
///
/// Returns `None` when the keyword is not in `frequencies`.
#[must_use]
pub fn keyword_source_map(frequencies: &[KeywordFrequency], keyword: &str) -> Option<Vec<SourceShare>> {
    let freq = frequencies.iter().find(|f| f.keyword == keyword)?;
    let total = freq.total_mentions;

    let mut shares: Vec<SourceShare> = freq
        .source_breakdown
        .iter()
        .map(|(&source, &mentions)| SourceShare {
            source,
            mentions,
            percentage: if total > 0 {
                (mentions as f64 / total as f64 * 100.0).round() as u32
            } else {
                0
            },
        })
        .collect();

    shares.sort_by(|a, b| b.mentions.cmp(&a.mentions));
    Some(shares)
}

/// Spreads ranked by `trend_score * spread_score`, keywords without a score count as 0
#[must_use]
pub fn viral_trends(
    spreads: &[CrossSourceSpread],
    scores: &[TrendScore],
    limit: usize,
) -> Vec<ViralTrend> {
    let score_by_keyword: HashMap<&str, f64> = scores
        .iter()
        .map(|s| (s.keyword.as_str(), s.score))
        .collect();

    let mut trends: Vec<ViralTrend> = spreads
        .iter()
        .map(|spread| ViralTrend {
            trend_score: score_by_keyword
                .get(spread.keyword.as_str())
                .copied()
                .unwrap_or(0.0),
            spread: spread.clone(),
        })
        .collect();

    trends.sort_by(|a, b| b.weight().partial_cmp(&a.weight()).unwrap_or(Ordering::Equal));
    trends.truncate(limit);
    trends
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::keyword_frequency::aggregate_keywords;
    use crate::models::NormalizedItem;
    use chrono::{TimeZone, Utc};

    fn mention(source: Source, keywords: &[&str]) -> NormalizedItem {
        let ts = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        NormalizedItem::new(source, "t", "https://example.com", ts).with_keywords(keywords.iter().copied())
    }

    fn repeat(source: Source, keyword: &str, n: usize) -> Vec<NormalizedItem> {
        (0..n).map(|_| mention(source, &[keyword])).collect()
    }

    #[test]
    fn test_spread_score_even_split() {
        let mut items = repeat(Source::GitHub, "react", 4);
        items.extend(repeat(Source::Reddit, "react", 4));
        items.extend(repeat(Source::DevTo, "react", 4));

        let spreads = detect_spreads(&aggregate_keywords(&items), DEFAULT_MIN_SOURCES);
        assert_eq!(spreads.len(), 1);
        assert_eq!(spreads[0].spread_score, 12.0);
        assert_eq!(spreads[0].source_count, 3);
        // 3 sources averaging 4 mentions
        assert_eq!(spreads[0].spread_level, SpreadLevel::Emerging);
    }

    #[test]
    fn test_spread_levels() {
        assert_eq!(SpreadLevel::classify(6, 3.0), SpreadLevel::Viral);
        assert_eq!(SpreadLevel::classify(6, 2.9), SpreadLevel::Growing);
        assert_eq!(SpreadLevel::classify(4, 1.0), SpreadLevel::Growing);
        assert_eq!(SpreadLevel::classify(3, 5.0), SpreadLevel::Growing);
        assert_eq!(SpreadLevel::classify(3, 4.9), SpreadLevel::Emerging);
    }

    #[test]
    fn test_spreads_below_min_sources_dropped() {
        let items = vec![
            mention(Source::GitHub, &["elixir", "go"]),
            mention(Source::Reddit, &["go"]),
            mention(Source::HackerNews, &["go"]),
        ];
        let spreads = detect_spreads(&aggregate_keywords(&items), 3);
        assert_eq!(spreads.len(), 1);
        assert_eq!(spreads[0].keyword, "go");
    }

    #[test]
    fn test_spreads_sorted_by_score() {
        let mut items = Vec::new();
        for source in [Source::GitHub, Source::Reddit, Source::DevTo] {
            items.push(mention(source, &["small", "big"]));
            items.push(mention(source, &["big"]));
        }
        let spreads = detect_spreads(&aggregate_keywords(&items), 3);
        assert_eq!(spreads[0].keyword, "big");
        assert!(spreads.windows(2).all(|w| w[0].spread_score >= w[1].spread_score));
    }

    #[test]
    fn test_correlation_identical_sets() {
        let items = vec![
            mention(Source::GitHub, &["rust", "go"]),
            mention(Source::HackerNews, &["rust", "go"]),
        ];
        let correlations = correlate_sources(&aggregate_keywords(&items));
        assert_eq!(correlations.len(), 1);
        assert_eq!(correlations[0].shared_keywords, 2);
        assert_eq!(correlations[0].similarity, 1.0);
    }

    #[test]
    fn test_correlation_partial_and_disjoint() {
        let items = vec![
            mention(Source::GitHub, &["rust", "go", "zig"]),
            mention(Source::HackerNews, &["rust"]),
            mention(Source::Medium, &["figma"]),
        ];
        let correlations = correlate_sources(&aggregate_keywords(&items));

        // medium shares nothing with anyone
        assert_eq!(correlations.len(), 1);
        let c = &correlations[0];
        assert_eq!((c.source_a, c.source_b), (Source::GitHub, Source::HackerNews));
        assert_eq!(c.similarity, 0.333);
    }

    #[test]
    fn test_keyword_source_map() {
        let mut items = repeat(Source::GitHub, "deno", 3);
        items.push(mention(Source::Reddit, &["deno"]));
        let freqs = aggregate_keywords(&items);

        let shares = keyword_source_map(&freqs, "deno").unwrap();
        assert_eq!(shares[0].source, Source::GitHub);
        assert_eq!(shares[0].mentions, 3);
        assert_eq!(shares[0].percentage, 75);
        assert_eq!(shares[1].percentage, 25);

        assert!(keyword_source_map(&freqs, "cobol").is_none());
    }

    #[test]
    fn test_viral_trends_ranking() {
        let mut items = Vec::new();
        for source in [Source::GitHub, Source::Reddit, Source::DevTo, Source::Medium] {
            items.push(mention(source, &["a", "b"]));
        }
        let freqs = aggregate_keywords(&items);
        let spreads = detect_spreads(&freqs, 3);

        let scores = vec![TrendScore {
            score: 50.0,
            ..TrendScore::zeroed("b", Category::Other)
        }];

        let viral = viral_trends(&spreads, &scores, 10);
        assert_eq!(viral.len(), 2);
        assert_eq!(viral[0].spread.keyword, "b");
        assert_eq!(viral[0].trend_score, 50.0);
        // unscored keyword falls back to 0
        assert_eq!(viral[1].trend_score, 0.0);

        assert_eq!(viral_trends(&spreads, &scores, 1).len(), 1);
    }
}
