use anyhow::{Context, Result};
use std::path::PathBuf;

use trendscope::analytics::run_analysis;
use trendscope::config::Config;

use super::load_items;

/// Inputs of the `analyze` command; flags override the config file
#[derive(Debug, Clone)]
pub struct AnalyzeParams {
    pub current: PathBuf,
    pub previous: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub top: Option<usize>,
    pub hot: Option<usize>,
    pub viral: Option<usize>,
    pub min_sources: Option<usize>,
    pub pretty: bool,
}

pub fn analyze(config: &Config, params: AnalyzeParams) -> Result<()> {
    let mut analysis = config.analysis.clone();
    if let Some(top) = params.top {
        analysis.top_keywords_limit = top;
    }
    if let Some(hot) = params.hot {
        analysis.hot_keywords_limit = hot;
    }
    if let Some(viral) = params.viral {
        analysis.viral_limit = viral;
    }
    if let Some(min_sources) = params.min_sources {
        analysis.min_cross_sources = min_sources;
    }

    analysis.validate().context("Invalid analysis options")?;

    let current = load_items(&params.current)?;
    let previous = params.previous.as_deref().map(load_items).transpose()?;

    let result = run_analysis(
        &current,
        previous.as_deref(),
        &analysis.to_options(),
    );

    let json = if params.pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };

    match params.output {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write result: {}", path.display()))?;
            tracing::info!(path = %path.display(), "Analysis result written");
        }
        None => println!("{json}"),
    }

    Ok(())
}
