use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use trendscope::config::Config;

mod commands;

use commands::{analyze, correlations, sources, AnalyzeParams};

#[derive(Parser)]
#[command(
    name = "trendscope",
    version,
    about = "Rank hot, accelerating and spreading tech keywords across content sources",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json), overrides the config file
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full trend analysis and print the result as JSON
    Analyze {
        /// Current-period items (JSON array)
        #[arg(long)]
        current: PathBuf,

        /// Previous-period items (JSON array) for velocity and surges
        #[arg(long)]
        previous: Option<PathBuf>,

        /// Write the result to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Keywords in the time-series view
        #[arg(long)]
        top: Option<usize>,

        /// Entries in the hot keyword list
        #[arg(long)]
        hot: Option<usize>,

        /// Entries in the viral list
        #[arg(long)]
        viral: Option<usize>,

        /// Minimum sources for a cross-source spread
        #[arg(long)]
        min_sources: Option<usize>,

        /// Pretty-print JSON
        #[arg(long, default_value = "false")]
        pretty: bool,
    },

    /// Show which sources mention a keyword
    Sources {
        /// Items (JSON array)
        #[arg(long)]
        current: PathBuf,

        /// Keyword to look up
        #[arg(short, long)]
        keyword: String,
    },

    /// Show keyword-set similarity between sources
    Correlations {
        /// Items (JSON array)
        #[arg(long)]
        current: PathBuf,

        /// Number of pairs to print
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Config::default(),
    }
    .apply_env_overrides();

    let log_format = cli
        .log_format
        .clone()
        .unwrap_or_else(|| config.logging.format.clone());
    setup_tracing(&log_format, &config.logging.level, cli.verbose)?;

    tracing::info!("trendscope starting");

    match cli.command {
        Commands::Analyze {
            current,
            previous,
            output,
            top,
            hot,
            viral,
            min_sources,
            pretty,
        } => {
            tracing::info!(
                current = %current.display(),
                previous = ?previous,
                output = ?output,
                "Starting analyze command"
            );
            analyze(
                &config,
                AnalyzeParams {
                    current,
                    previous,
                    output,
                    top,
                    hot,
                    viral,
                    min_sources,
                    pretty,
                },
            )?;
        }

        Commands::Sources { current, keyword } => {
            tracing::info!(current = %current.display(), keyword = %keyword, "Starting sources command");
            sources(&current, &keyword)?;
        }

        Commands::Correlations { current, limit } => {
            tracing::info!(current = %current.display(), limit = %limit, "Starting correlations command");
            correlations(&current, limit)?;
        }
    }

    tracing::info!("trendscope completed successfully");
    Ok(())
}

fn setup_tracing(format: &str, level: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("trendscope=debug,info")
    } else {
        tracing_subscriber::EnvFilter::try_new(format!("trendscope={level},warn"))
            .context("Invalid log level")?
    };

    // stdout carries the JSON result, logs go to stderr
    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    Ok(())
}
