//! Tests for loading configuration files

use std::io::Write;

use tempfile::NamedTempFile;
use trendscope::config::Config;
use trendscope::error::ErrorCategory;

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp file");
    file.write_all(content.as_bytes()).expect("write config");
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
[analysis]
top_keywords_limit = 25
hot_keywords_limit = 10
viral_limit = 5
min_cross_sources = 4

[analysis.surge]
velocity_threshold = 80.0
min_mentions = 5
min_sources = 3

[collection]
timeout_secs = 15

[logging]
level = "debug"
format = "json"
"#,
    );

    let config = Config::from_file(file.path()).unwrap();
    let options = config.analysis.to_options();

    assert_eq!(options.top_keywords_limit, 25);
    assert_eq!(options.min_cross_sources, 4);

    let surge = options.surge.resolve();
    assert_eq!(surge.velocity_threshold, 80.0);
    assert_eq!(surge.min_mentions, 5);
    assert_eq!(surge.min_sources, 3);

    assert_eq!(config.collection.timeout_secs, 15);
    assert_eq!(config.logging.format, "json");
}

#[test]
fn test_empty_file_uses_defaults() {
    let file = write_config("");
    let config = Config::from_file(file.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_invalid_values_rejected() {
    let file = write_config("[analysis]\nhot_keywords_limit = 0\n");
    let err = Config::from_file(file.path()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Config);
}

#[test]
fn test_malformed_toml_rejected() {
    let file = write_config("[analysis\nviral_limit = ");
    let err = Config::from_file(file.path()).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Parsing);
}

#[test]
fn test_missing_file() {
    let err = Config::from_file(std::path::Path::new("/nonexistent/trendscope.toml")).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::Storage);
    assert!(err.to_string().starts_with("I/O error"));
}
