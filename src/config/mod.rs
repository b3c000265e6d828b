//! Configuration management for trendscope
//!
//! Configuration is loaded from a TOML file; logging can additionally be
//! overridden from the environment. The analysis core only ever sees the
//! resolved [`AnalysisOptions`].

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::analytics::{AnalysisOptions, SurgeOverrides};
use crate::error::{Error, Result};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Analysis limits and thresholds
    pub analysis: AnalysisConfig,

    /// Upstream collection settings
    pub collection: CollectionConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Analysis limits and thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub top_keywords_limit: usize,
    pub hot_keywords_limit: usize,
    pub viral_limit: usize,
    pub min_cross_sources: usize,

    /// Surge detector overrides (`[analysis.surge]`)
    pub surge: SurgeOverrides,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        let options = AnalysisOptions::default();
        Self {
            top_keywords_limit: options.top_keywords_limit,
            hot_keywords_limit: options.hot_keywords_limit,
            viral_limit: options.viral_limit,
            min_cross_sources: options.min_cross_sources,
            surge: options.surge,
        }
    }
}

impl AnalysisConfig {
    /// Validate limits and surge thresholds
    pub fn validate(&self) -> Result<()> {
        if self.top_keywords_limit == 0 {
            return Err(Error::config("top_keywords_limit must be greater than 0"));
        }
        if self.hot_keywords_limit == 0 {
            return Err(Error::config("hot_keywords_limit must be greater than 0"));
        }
        if self.viral_limit == 0 {
            return Err(Error::config("viral_limit must be greater than 0"));
        }
        if self.min_cross_sources == 0 {
            return Err(Error::config("min_cross_sources must be at least 1"));
        }

        let surge = self.surge.resolve();
        if !surge.velocity_threshold.is_finite() || surge.velocity_threshold < 0.0 {
            return Err(Error::config("surge velocity_threshold must be a non-negative number"));
        }

        Ok(())
    }

    /// Resolve into options for a run
    #[must_use]
    pub fn to_options(&self) -> AnalysisOptions {
        AnalysisOptions {
            top_keywords_limit: self.top_keywords_limit,
            hot_keywords_limit: self.hot_keywords_limit,
            viral_limit: self.viral_limit,
            min_cross_sources: self.min_cross_sources,
            surge: self.surge,
        }
    }
}

/// Upstream collection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Per-collector timeout in seconds
    pub timeout_secs: u64,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self { timeout_secs: 30 }
    }
}

impl CollectionConfig {
    /// Get collector timeout as Duration
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = toml::from_str(&content)?;
        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Override logging settings from `TRENDSCOPE_LOG_LEVEL` / `TRENDSCOPE_LOG_FORMAT`
    #[must_use]
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(level) = std::env::var("TRENDSCOPE_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("TRENDSCOPE_LOG_FORMAT") {
            self.logging.format = format;
        }
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()?;

        if self.collection.timeout_secs == 0 {
            return Err(Error::config("collection timeout_secs must be greater than 0"));
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            return Err(Error::config(format!(
                "unknown log format: {}",
                self.logging.format
            )));
        }

        Ok(())
    }
}
