//! End-to-end tests for the analysis pipeline

mod common;

use common::{create_item, repeat_item};
use trendscope::analytics::{run_analysis, AnalysisOptions, SpreadLevel, SurgeLevel, SurgeOverrides};
use trendscope::models::{NormalizedItem, Source};

fn scenario_a_items() -> Vec<NormalizedItem> {
    vec![
        create_item(Source::GitHub, &["react"]),
        create_item(Source::HackerNews, &["react"]),
        create_item(Source::Reddit, &["react"]),
        create_item(Source::DevTo, &["react"]),
        create_item(Source::GitHub, &["elixir"]),
        create_item(Source::Medium, &["kotlin"]),
        create_item(Source::YouTube, &[]),
        create_item(Source::Naver, &["flutter"]),
        create_item(Source::Yozm, &[]),
        create_item(Source::Codenary, &["kotlin"]),
    ]
}

#[test]
fn test_spread_across_four_sources() {
    let items = scenario_a_items();
    assert_eq!(items.len(), 10);

    let options = AnalysisOptions {
        min_cross_sources: 3,
        ..Default::default()
    };
    let result = run_analysis(&items, None, &options);

    let react = result
        .cross_source_spreads
        .iter()
        .find(|s| s.keyword == "react")
        .expect("react should be spreading");
    assert_eq!(react.source_count, 4);
    assert_eq!(react.spread_score, 4.0);
    assert_eq!(react.spread_level, SpreadLevel::Growing);

    assert!(result.cross_source_spreads.iter().all(|s| s.keyword != "elixir"));
    assert!(result.viral_trends.iter().all(|v| v.spread.keyword != "elixir"));
    assert_eq!(result.meta.total_items, 10);
    assert_eq!(result.meta.unique_keywords, 4);
}

#[test]
fn test_empty_batch_yields_empty_result() {
    let result = run_analysis(&[], None, &AnalysisOptions::default());

    assert!(result.frequencies.is_empty());
    assert!(result.top_frequencies.is_empty());
    assert!(result.trend_scores.is_empty());
    assert!(result.keyword_trends.is_empty());
    assert!(result.hot_keywords.is_empty());
    assert!(result.surge_alerts.is_empty());
    assert!(result.cross_source_spreads.is_empty());
    assert!(result.source_correlations.is_empty());
    assert!(result.viral_trends.is_empty());
    assert_eq!(result.meta.total_items, 0);
    assert_eq!(result.meta.unique_keywords, 0);
}

#[test]
fn test_empty_batch_with_previous_period() {
    let previous = repeat_item(Source::GitHub, "x", 5);
    let result = run_analysis(&[], Some(&previous), &AnalysisOptions::default());

    assert!(result.trend_scores.is_empty());
    assert!(result.surge_alerts.is_empty());
    assert_eq!(result.meta.total_items, 0);
}

#[test]
fn test_doubling_gives_velocity_100() {
    let current = repeat_item(Source::GitHub, "x", 20);
    let previous = repeat_item(Source::GitHub, "x", 10);

    let result = run_analysis(&current, Some(&previous), &AnalysisOptions::default());

    let x = result.trend_scores.iter().find(|s| s.keyword == "x").unwrap();
    assert_eq!(x.velocity, 100.0);

    let view = result.keyword_trends.iter().find(|t| t.keyword == "x").unwrap();
    assert_eq!(view.velocity, 100.0);
    assert_eq!(view.total_mentions, 20);
}

#[test]
fn test_new_keyword_velocity() {
    let current = repeat_item(Source::Reddit, "htmx", 7);
    let previous = repeat_item(Source::Reddit, "jquery", 3);

    let result = run_analysis(&current, Some(&previous), &AnalysisOptions::default());
    assert_eq!(result.trend_scores[0].velocity, 100.0);
}

#[test]
fn test_shrinking_keyword_velocity_rounding() {
    let current = repeat_item(Source::GitHub, "x", 31);
    let previous = repeat_item(Source::GitHub, "x", 32);

    let result = run_analysis(&current, Some(&previous), &AnalysisOptions::default());
    assert_eq!(result.trend_scores[0].velocity, -3.12);
}

#[test]
fn test_top_keywords_limit_honored() {
    let items: Vec<NormalizedItem> = ["a", "b", "c", "d", "e", "f"]
        .iter()
        .map(|kw| create_item(Source::GitHub, &[kw]))
        .collect();

    let options = AnalysisOptions {
        top_keywords_limit: 3,
        hot_keywords_limit: 2,
        ..Default::default()
    };
    let result = run_analysis(&items, None, &options);

    assert_eq!(result.frequencies.len(), 6);
    assert_eq!(result.trend_scores.len(), 6);
    assert_eq!(result.top_frequencies.len(), 3);
    assert_eq!(result.keyword_trends.len(), 3);
    assert_eq!(result.hot_keywords.len(), 2);
}

#[test]
fn test_surge_alert_end_to_end() {
    let mut current = Vec::new();
    current.extend(repeat_item(Source::GitHub, "deno", 10));
    current.extend(repeat_item(Source::HackerNews, "deno", 10));
    let previous = repeat_item(Source::GitHub, "deno", 5);

    let result = run_analysis(&current, Some(&previous), &AnalysisOptions::default());

    assert_eq!(result.surge_alerts.len(), 1);
    let alert = &result.surge_alerts[0];
    assert_eq!(alert.keyword, "deno");
    assert_eq!(alert.current_mentions, 20);
    assert_eq!(alert.previous_mentions, 5);
    assert_eq!(alert.velocity, 300.0);
    assert_eq!(alert.level, SurgeLevel::Surge);
    assert!(!alert.is_spreading);
}

#[test]
fn test_surge_overrides_applied() {
    let current = repeat_item(Source::GitHub, "zig", 4);

    let strict = run_analysis(&current, None, &AnalysisOptions::default());
    // single source is rejected by default
    assert!(strict.surge_alerts.is_empty());

    let relaxed = AnalysisOptions {
        surge: SurgeOverrides {
            min_sources: Some(1),
            ..Default::default()
        },
        ..Default::default()
    };
    let result = run_analysis(&current, None, &relaxed);
    assert_eq!(result.surge_alerts.len(), 1);
    assert_eq!(result.surge_alerts[0].level, SurgeLevel::Spike);
}

#[test]
fn test_hot_keywords_follow_score_order() {
    let mut items = scenario_a_items();
    items.extend(repeat_item(Source::Yozm, "kotlin", 3));

    let result = run_analysis(&items, None, &AnalysisOptions::default());

    assert_eq!(result.hot_keywords[0].keyword, result.trend_scores[0].keyword);
    for (i, hot) in result.hot_keywords.iter().enumerate() {
        assert_eq!(hot.rank, i + 1);
    }
    assert!(result
        .trend_scores
        .windows(2)
        .all(|w| w[0].score >= w[1].score));
}

#[test]
fn test_result_is_reproducible() {
    let items = scenario_a_items();
    let previous = repeat_item(Source::GitHub, "react", 2);
    let options = AnalysisOptions::default();

    let mut first = run_analysis(&items, Some(&previous), &options);
    let mut second = run_analysis(&items, Some(&previous), &options);

    // only the run metadata is allowed to differ
    first.meta = second.meta.clone();
    for alert in first.surge_alerts.iter_mut() {
        alert.detected_at = second.meta.analyzed_at;
    }
    for alert in second.surge_alerts.iter_mut() {
        alert.detected_at = second.meta.analyzed_at;
    }

    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_result_json_contract() {
    let result = run_analysis(&scenario_a_items(), None, &AnalysisOptions::default());
    let json = serde_json::to_value(&result).unwrap();

    for key in [
        "frequencies",
        "topFrequencies",
        "trendScores",
        "keywordTrends",
        "hotKeywords",
        "surgeAlerts",
        "crossSourceSpreads",
        "sourceCorrelations",
        "viralTrends",
    ] {
        assert!(json[key].is_array(), "missing array field {key}");
    }
    assert_eq!(json["meta"]["totalItems"], 10);
    assert!(json["meta"]["analyzedAt"].is_string());

    let react = json["frequencies"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["keyword"] == "react")
        .unwrap();
    assert_eq!(react["sourceBreakdown"]["hackernews"], 1);
    assert_eq!(react["hourlyBuckets"]["2025-06-01T09"], 4);

    let viral = &json["viralTrends"][0];
    assert!(viral["spreadScore"].is_number());
    assert!(viral["trendScore"].is_number());
}
