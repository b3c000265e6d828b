//! Upstream collection contract
//!
//! Source adapters (HTTP, RSS, scraping) live outside this crate. They plug in
//! through the [`Collector`] trait, and [`run_collection`] fans out over all of
//! them, keeping whatever succeeds and recording what failed.

pub mod pipeline;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CollectError;
use crate::models::{NormalizedItem, Source};

pub use pipeline::{dedupe_by_url, run_collection, CollectionOutcome};

/// Item as returned by a source, before normalization
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawItem {
    pub title: String,
    pub url: String,
    pub score: Option<f64>,
    pub description: Option<String>,
    pub author: Option<String>,
    #[serde(default)]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

/// A source adapter
#[async_trait]
pub trait Collector: Send + Sync {
    /// Source this collector reads from
    fn source(&self) -> Source;

    /// Priority bucket (1 = highest)
    fn tier(&self) -> u8;

    /// Fetch raw items from the source
    async fn collect(&self) -> Result<Vec<RawItem>, CollectError>;

    /// Map raw items into the common shape, assigning keywords and category
    fn normalize(&self, raw: Vec<RawItem>) -> Vec<NormalizedItem>;
}

/// Outcome of one collector run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionStatus {
    Success,
    Error,
}

/// Per-collector report, for logging and monitoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionResult {
    pub source: Source,
    pub status: CollectionStatus,
    pub items_count: usize,
    pub duration_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CollectionResult {
    /// Whether the collector produced items
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == CollectionStatus::Success
    }
}
