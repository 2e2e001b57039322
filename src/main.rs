//! Quote-Harvest main entry point
//!
//! This is the thin command-line shell around the core pipeline: it
//! resolves the category selection and page limit, sets up logging, and
//! prints the run summary. Everything else lives in the library.

use anyhow::{bail, Context};
use clap::Parser;
use quote_harvest::catalog::{self, Category, CATALOG};
use quote_harvest::config::load_settings;
use quote_harvest::crawler::harvest;
use quote_harvest::text::normalize_category;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Environment fallback for the category selection
const TAG_SELECTION_ENV: &str = "QUOTES_TAG_SELECTION";

/// Environment fallback for the page limit
const PAGE_LIMIT_ENV: &str = "QUOTES_PAGE_LIMIT";

/// Quote-Harvest: an incremental quotes-site exporter
///
/// Scrapes the configured quote categories, deduplicates against the
/// existing CSV files (and the shared sheet, when configured), and appends
/// only the new rows.
#[derive(Parser, Debug)]
#[command(name = "quote-harvest")]
#[command(version = "1.0.0")]
#[command(about = "Incremental quotes-site exporter", long_about = None)]
struct Cli {
    /// Categories to scrape: "all", ordinals, or ranges (e.g. "1,4-9")
    #[arg(short, long)]
    tags: Option<String>,

    /// Pages per category (0 = all, bounded by the per-category cap)
    #[arg(short, long)]
    pages: Option<u32>,

    /// Path to a TOML settings file (defaults are used when omitted)
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// List the category catalog and exit
    #[arg(long)]
    list_tags: bool,

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

    setup_logging(cli.verbose, cli.quiet);

    if cli.list_tags {
        print_catalog();
        return Ok(());
    }

    let settings =
        load_settings(cli.config.as_deref()).context("Failed to load settings")?;

    let selection = resolve_selection(cli.tags.as_deref())?;
    let categories: Vec<&Category> = selection
        .iter()
        .filter_map(|&ordinal| catalog::by_ordinal(ordinal))
        .collect();
    let page_limit = resolve_page_limit(cli.pages)?;

    tracing::info!(
        "Scraping {} categories, page limit {}",
        categories.len(),
        if page_limit == 0 { "all".to_string() } else { page_limit.to_string() }
    );

    let summary = harvest(settings, &categories, page_limit).await?;

    println!();
    for outcome in &summary.categories {
        let status = if outcome.fetch_failed { " (request failed)" } else { "" };
        println!(
            "  {}: {} new quotes over {} pages{}",
            outcome.name, outcome.new_quotes, outcome.pages_fetched, status
        );
    }
    if summary.total_new() > 0 {
        println!("Scraping complete. Added {} new quotes.", summary.total_new());
    } else {
        println!("Scraping complete. No new quotes were found.");
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
            0 => EnvFilter::new("quote_harvest=info,warn"),
            1 => EnvFilter::new("quote_harvest=debug,info"),
            2 => EnvFilter::new("quote_harvest=trace,debug"),
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

/// Prints the catalog as "ordinal: name" lines
fn print_catalog() {
    println!("Available categories:");
    for category in CATALOG {
        println!("  {:>2}  {}", category.ordinal, normalize_category(category.name));
    }
}

/// Resolves the category selection from the CLI, the environment, or "all"
///
/// Malformed selections are rejected here, at the input boundary; the core
/// only ever sees valid ordinals.
fn resolve_selection(arg: Option<&str>) -> anyhow::Result<Vec<u32>> {
    let max = CATALOG.len() as u32;

    let chosen = arg
        .map(str::to_string)
        .or_else(|| std::env::var(TAG_SELECTION_ENV).ok())
        .unwrap_or_else(|| "all".to_string());
    let chosen = chosen.trim().to_lowercase();

    if chosen.is_empty() || chosen == "all" {
        return Ok(CATALOG.iter().map(|c| c.ordinal).collect());
    }

    match catalog::parse_selection(&chosen, max) {
        Some(selection) => Ok(selection.into_iter().collect()),
        None => bail!(
            "Invalid category selection '{}': use \"all\", ordinals, or ranges like 1-5",
            chosen
        ),
    }
}

/// Resolves the page limit from the CLI or the environment (default: all)
fn resolve_page_limit(arg: Option<u32>) -> anyhow::Result<u32> {
    if let Some(pages) = arg {
        return Ok(pages);
    }

    match std::env::var(PAGE_LIMIT_ENV) {
        Ok(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{PAGE_LIMIT_ENV} must be a non-negative whole number")),
        Err(_) => Ok(0),
    }
}
