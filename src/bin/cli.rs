//! FilmAffinity review scraper CLI
//!
//! Reads a titles CSV, resolves each title against the catalog's search,
//! crawls the review listings and writes reviews.json / reviews.csv.

use std::path::PathBuf;

use clap::Parser;

use affinity_scraper::{
    error::Result,
    models::{Config, ShowQuery},
    pipeline,
    storage::LocalStorage,
};

/// affinity-scraper - FilmAffinity review scraper
#[derive(Parser, Debug)]
#[command(
    name = "affinity-scraper",
    version,
    about = "Resolves show titles and scrapes their FilmAffinity reviews"
)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "data/config.toml")]
    config: PathBuf,

    /// CSV file with `title` and `release_year` columns
    /// (default: paths.titles_file from the config)
    #[arg(short, long)]
    titles: Option<String>,

    /// Directory for reviews.json / reviews.csv
    /// (default: paths.output_dir from the config)
    #[arg(short, long)]
    output: Option<String>,

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

    let mut config = Config::load_or_default(&cli.config);
    if let Some(titles) = cli.titles {
        config.paths.titles_file = titles;
    }
    if let Some(output) = cli.output {
        config.paths.output_dir = output;
    }
    config.validate()?;

    let queries = ShowQuery::load_csv(&config.paths.titles_file)?;
    log::info!(
        "Loaded {} titles from {}",
        queries.len(),
        config.paths.titles_file
    );

    let storage = LocalStorage::new(&config.paths.output_dir);
    pipeline::run_scraper(&config, &storage, &queries).await?;

    Ok(())
}
