//! Chartsweep main entry point
//!
//! Runs the full sweep with no required arguments: discover genres, count
//! pages per genre, scrape every page over the worker pool, append to the
//! output spreadsheet.

use anyhow::Context;
use chartsweep::config::{load_config_or_default, Config};
use chartsweep::output::{persist, print_run_summary, RunSummary};
use chartsweep::scrape::{build_http_client, discover_genres, RetryPolicy, TaskScheduler};
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use url::Url;

/// Chartsweep: a VGChartz game-sales harvester
///
/// Scrapes game-sales listings for every genre the site offers and appends
/// the records to a spreadsheet file. Runs with built-in defaults when no
/// configuration file is given.
#[derive(Parser, Debug)]
#[command(name = "chartsweep")]
#[command(version)]
#[command(about = "A VGChartz game-sales harvester", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (optional, defaults apply)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Override the output spreadsheet path
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config, discover genres, and show what would be scraped
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config =
        load_config_or_default(cli.config.as_deref()).context("Failed to load configuration")?;

    if let Some(output) = &cli.output {
        config.output.spreadsheet_path = output.display().to_string();
    }

    if cli.dry_run {
        handle_dry_run(&config).await
    } else {
        handle_sweep(config).await
    }
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("chartsweep=info,warn"),
            1 => EnvFilter::new("chartsweep=debug,info"),
            2 => EnvFilter::new("chartsweep=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: validates config and lists the genres a run would scrape
async fn handle_dry_run(config: &Config) -> anyhow::Result<()> {
    println!("=== Chartsweep Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Workers: {}", config.scraper.workers);
    println!("  Retry max attempts: {}", config.scraper.retry_max_attempts);
    println!("  Retry backoff: {}s", config.scraper.retry_backoff_secs);
    println!("  Request jitter: {}ms", config.scraper.request_jitter_ms);
    println!("  User agent: {}", config.scraper.user_agent);

    println!("\nSite:");
    println!("  Base URL: {}", config.site.base_url);

    println!("\nOutput:");
    println!("  Spreadsheet: {}", config.output.spreadsheet_path);

    let client = build_http_client(&config.scraper)?;
    let base = Url::parse(&config.site.base_url)?;
    let retry = RetryPolicy::from_config(&config.scraper);

    let genres = discover_genres(&client, &base, &retry).await?;

    println!("\nGenres ({}):", genres.len());
    for genre in &genres {
        println!("  - {}", genre);
    }

    println!("\n✓ Configuration is valid");
    println!("✓ Would scrape {} genres", genres.len());

    Ok(())
}

/// Handles the main sweep operation
async fn handle_sweep(config: Config) -> anyhow::Result<()> {
    let start = std::time::Instant::now();

    let client = build_http_client(&config.scraper)?;
    let base = Url::parse(&config.site.base_url)?;
    let retry = RetryPolicy::from_config(&config.scraper);

    let genres = discover_genres(&client, &base, &retry).await?;
    if genres.is_empty() {
        anyhow::bail!("Could not retrieve any genres from the search form");
    }

    tracing::info!("Found genres: {}", genres.len());
    for genre in &genres {
        tracing::debug!(" - {}", genre);
    }

    let scheduler = TaskScheduler::new(client, base, retry, config.scraper.workers);
    let outcome = scheduler.run(&genres).await?;

    tracing::info!(
        "Collected {} records ({} of {} pages failed)",
        outcome.records.len(),
        outcome.pages_failed,
        outcome.pages_scheduled
    );

    // Persistence failure is run-fatal: the file is the sole deliverable
    let path = Path::new(&config.output.spreadsheet_path);
    let persisted = persist(&outcome.records, path)
        .with_context(|| format!("Failed to write spreadsheet {}", path.display()))?;

    print_run_summary(&RunSummary {
        genres_discovered: genres.len(),
        genres_skipped: outcome.genres_skipped,
        pages_scheduled: outcome.pages_scheduled,
        pages_failed: outcome.pages_failed,
        records_collected: outcome.records.len(),
        rows_appended: persisted.appended,
        total_rows: persisted.total_rows,
        elapsed: start.elapsed(),
    });

    Ok(())
}
