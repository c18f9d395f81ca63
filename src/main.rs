//! Skimmer main entry point
//!
//! This is the command-line interface for the skimmer scraping pipeline.

use anyhow::Context;
use clap::Parser;
use skimmer::config::{
    build_job, JobArgs, DEFAULT_COLUMNS, DEFAULT_MAX_PAGES, DEFAULT_NEXT_SELECTOR,
    DEFAULT_OUTPUT_PATH,
};
use skimmer::crawler::walk;
use skimmer::output::export_record;
use skimmer::{PageRecord, SkimmerError};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Skimmer: a one-shot paginated listing scraper
///
/// Skimmer fetches a bounded chain of pages starting from a seed URL,
/// extracts fields with CSS selector rules, follows the next-page anchor
/// from page to page, and exports one accumulated record as CSV.
#[derive(Parser, Debug)]
#[command(name = "skimmer")]
#[command(version = "0.1.0")]
#[command(about = "A one-shot paginated listing scraper", long_about = None)]
struct Cli {
    /// Scheme+host prefix prepended to the start page
    #[arg(long, value_name = "URL")]
    base_url: String,

    /// Path or full URL appended to base-url to form the seed
    #[arg(long, value_name = "PAGE")]
    start_page: String,

    /// Comma-separated name=selector pairs, e.g. "title=h3 a,price=.price_color"
    #[arg(long, value_name = "RULES")]
    selectors: String,

    /// Maximum number of pages to scrape
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_PAGES)]
    max_pages: u32,

    /// CSS selector for the next-page anchor
    #[arg(long, value_name = "SELECTOR", default_value = DEFAULT_NEXT_SELECTOR)]
    next_selector: String,

    /// Output CSV path
    #[arg(long, value_name = "FILE", default_value = DEFAULT_OUTPUT_PATH)]
    out: PathBuf,

    /// Comma-separated Header=field pairs for the CSV schema
    #[arg(long, value_name = "COLUMNS", default_value = DEFAULT_COLUMNS)]
    columns: String,

    /// Index of the scraped record to export
    #[arg(long, value_name = "N", default_value_t = 0)]
    record: usize,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = build_job(JobArgs {
        base_url: cli.base_url,
        start_page: cli.start_page,
        selectors: cli.selectors,
        max_pages: cli.max_pages,
        next_selector: cli.next_selector,
        out: cli.out,
        columns: cli.columns,
        record: cli.record,
    })
    .context("invalid job configuration")?;

    tracing::info!(
        "Job: seed {}, {} selector rule(s), up to {} page(s)",
        config.seed_url(),
        config.rules.len(),
        config.max_pages
    );

    let export = config.export.clone();
    let outcome = walk(config).await?;

    println!(
        "Scraped {} page(s); walk stopped: {}",
        outcome.records.len(),
        outcome.reason
    );

    // A missing record index still exports, leaving a header-only file
    let fallback = PageRecord::default();
    let record = outcome.records.get(export.record_index).unwrap_or(&fallback);

    let rows = export_record(&export, record).context("export failed")?;
    println!("✓ Wrote {} data row(s) to {}", rows, export.path.display());

    if outcome.records.len() <= export.record_index {
        return Err(SkimmerError::RecordUnavailable {
            index: export.record_index,
            available: outcome.records.len(),
        }
        .into());
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("skimmer=info,warn"),
            1 => EnvFilter::new("skimmer=debug,info"),
            2 => EnvFilter::new("skimmer=trace,debug"),
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
