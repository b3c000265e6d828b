pub mod analyze;
pub mod correlations;
pub mod sources;

// Re-export command functions for convenience
pub use analyze::{analyze, AnalyzeParams};
pub use correlations::correlations;
pub use sources::sources;

use anyhow::{Context, Result};
use std::path::Path;

use trendscope::models::NormalizedItem;

/// Read a JSON array of normalized items
pub fn load_items(path: &Path) -> Result<Vec<NormalizedItem>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read items file: {}", path.display()))?;

    let items: Vec<NormalizedItem> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse items file: {}", path.display()))?;

    tracing::debug!(path = %path.display(), items = items.len(), "Loaded items");
    Ok(items)
}
