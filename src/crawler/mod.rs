//! Crawler module for listing-page fetching and processing
//!
//! This module contains the core scraping logic, including:
//! - HTTP fetching with error capture
//! - Listing-page parsing and next-page discovery
//! - The per-category pipeline driving both output sinks

mod fetcher;
mod parser;
mod pipeline;

pub use fetcher::{build_http_client, fetch_page, FetchResult};
pub use parser::{extract_quote, parse_listing, Extraction, ParsedListing, RawQuote, SkipReason};
pub use pipeline::{CategoryOutcome, HarvestSummary, Pipeline};

use crate::catalog::Category;
use crate::config::Settings;
use crate::output::SheetSink;

/// Runs a complete harvest
///
/// This is the main entry point for a scrape. It probes the sheet sink,
/// builds the pipeline, and processes the selected categories in order.
///
/// # Arguments
///
/// * `settings` - The scraper settings
/// * `categories` - Catalog entries to process
/// * `page_limit` - Pages per category (0 = all, up to the safety cap)
///
/// # Returns
///
/// * `Ok(HarvestSummary)` - Per-category outcomes for the run
/// * `Err(HarvestError)` - The run aborted (CSV sink failure)
pub async fn harvest(
    settings: Settings,
    categories: &[&Category],
    page_limit: u32,
) -> crate::Result<HarvestSummary> {
    let sheets = SheetSink::from_env().await;
    let mut pipeline = Pipeline::new(settings, sheets)?;
    pipeline.run(categories, page_limit).await
}
