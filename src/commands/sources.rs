use anyhow::Result;
use std::path::Path;

use trendscope::analytics::{aggregate_keywords, keyword_source_map};
use trendscope::models::Category;

use super::load_items;

pub fn sources(current: &Path, keyword: &str) -> Result<()> {
    let items = load_items(current)?;
    let frequencies = aggregate_keywords(&items);

    let Some(shares) = keyword_source_map(&frequencies, keyword) else {
        println!("Keyword \"{keyword}\" not found in {} items", items.len());
        return Ok(());
    };

    let category = frequencies
        .iter()
        .find(|f| f.keyword == keyword)
        .map_or(Category::Other, |f| f.category);

    println!("Sources for \"{keyword}\" ({})", category.display_name());
    println!("================================");
    for share in shares {
        println!(
            "{:<16} {:>6} mentions  {:>3}%",
            share.source.as_str(),
            share.mentions,
            share.percentage
        );
    }

    Ok(())
}
