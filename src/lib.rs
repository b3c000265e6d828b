//! trendscope - multi-source tech trend analysis
//!
//! Turns items collected from many content sources (news aggregators, code
//! trend pages, video platforms, search trends, social sites, tech blogs)
//! into ranked trend signals: which keywords are hot, which are accelerating,
//! which are spreading across sources, and which sources behave alike.
//!
//! # Architecture
//!
//! - [`models`] - Input contract: sources, categories, normalized items
//! - [`analytics`] - Aggregation, scoring, surge and cross-source analysis
//! - [`collector`] - Upstream collector trait and settle-all collection run
//! - [`config`] - Configuration loading and validation
//! - [`error`] - Error types
//!
//! # Example
//!
//! ```no_run
//! use trendscope::analytics::{run_analysis, AnalysisOptions};
//! use trendscope::models::NormalizedItem;
//!
//! # fn main() -> anyhow::Result<()> {
//! let items: Vec<NormalizedItem> = serde_json::from_str(&std::fs::read_to_string("items.json")?)?;
//! let result = run_analysis(&items, None, &AnalysisOptions::default());
//!
//! for hot in &result.hot_keywords {
//!     println!("{}. {} ({} mentions)", hot.rank, hot.keyword, hot.mentions);
//! }
//! # Ok(())
//! # }
//! ```

pub mod analytics;
pub mod collector;
pub mod config;
pub mod error;
pub mod models;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::analytics::{run_analysis, AnalysisOptions, AnalysisResult};
    pub use crate::collector::{run_collection, Collector};
    pub use crate::config::Config;
    pub use crate::error::{Error, ErrorCategory, Result};
    pub use crate::models::{Category, NormalizedItem, Source};
}

// Direct re-exports for convenience
pub use models::{Category, NormalizedItem, Source};
