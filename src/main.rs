// src/main.rs

//! uksc-feeds CLI
//!
//! Fetches the UK Supreme Court listing pages and publishes them as two
//! RSS 2.0 files. Intended to be run once per scheduled period; a nonzero
//! exit means at least one feed pipeline failed and the scheduler should
//! simply retry on the next run.

use std::path::PathBuf;

use clap::Parser;

use uksc_feeds::{error::Result, models::Config, pipeline, storage::LocalStorage};

/// uksc-feeds - UK Supreme Court judgment feeds
#[derive(Parser, Debug)]
#[command(name = "uksc-feeds", version, about = "Generates RSS feeds for UK Supreme Court judgments")]
struct Cli {
    /// Path to an optional TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the output directory (useful for testing)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

/// Initialize logging based on verbosity flag.
fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    log::info!("uksc-feeds starting...");

    let mut config = Config::load_or_default(&cli.config);
    if let Some(dir) = cli.output_dir {
        config.output.dir = dir.display().to_string();
    }
    config.validate()?;

    let storage = LocalStorage::new(&config.output.dir);

    let outcomes = pipeline::run_all(&config, &storage).await?;
    for outcome in &outcomes {
        log::info!(
            "{}: {} items published to {}",
            outcome.name,
            outcome.item_count,
            outcome.output_path.display()
        );
    }

    log::info!("Done!");

    Ok(())
}
