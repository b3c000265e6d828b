use anyhow::Result;
use std::path::Path;

use trendscope::analytics::{aggregate_keywords, correlate_sources};

use super::load_items;

pub fn correlations(current: &Path, limit: usize) -> Result<()> {
    let items = load_items(current)?;
    let correlations = correlate_sources(&aggregate_keywords(&items));

    if correlations.is_empty() {
        println!("No source pairs share a keyword");
        return Ok(());
    }

    println!("Source correlations ({} pairs)", correlations.len());
    println!("================================");
    for (i, c) in correlations.iter().take(limit).enumerate() {
        println!(
            "{:>3}. {} <-> {}  similarity {:.3}  ({} shared)",
            i + 1,
            c.source_a,
            c.source_b,
            c.similarity,
            c.shared_keywords
        );
    }

    Ok(())
}
