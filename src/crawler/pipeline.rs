//! Category pipeline - per-category scrape orchestration
//!
//! Drives the fetch -> parse -> dedup -> append loop for every selected
//! category, strictly sequentially: one category at a time, one page at a
//! time, one politeness pause before every request. Admitted rows hit the
//! CSV sink immediately (a crash loses at most the in-flight page) and are
//! staged for a single batched sheet append at category completion.

use crate::catalog::Category;
use crate::config::Settings;
use crate::crawler::fetcher::{build_http_client, fetch_page};
use crate::crawler::parser::parse_listing;
use crate::output::{load_existing, CsvSink, SheetSink};
use crate::record::QuoteRecord;
use crate::state::{CategoryPhase, DedupLedger};
use crate::text::{category_filename, dedup_key, normalize_category};
use crate::HarvestError;
use rand::Rng;
use reqwest::Client;
use std::path::Path;
use std::time::Duration;
use url::Url;

/// How one category ended
#[derive(Debug, Clone)]
pub struct CategoryOutcome {
    /// Normalized display name
    pub name: String,

    /// Pages fetched and parsed for this category
    pub pages_fetched: u32,

    /// New rows appended this run
    pub new_quotes: u64,

    /// True when pagination ended on a failed request rather than the last
    /// page or the page limit; rows written before the failure are kept
    pub fetch_failed: bool,
}

/// Summary of a whole run
#[derive(Debug, Clone, Default)]
pub struct HarvestSummary {
    /// Per-category outcomes, in processing order
    pub categories: Vec<CategoryOutcome>,
}

impl HarvestSummary {
    /// Total new rows across all categories
    pub fn total_new(&self) -> u64 {
        self.categories.iter().map(|c| c.new_quotes).sum()
    }

    /// Number of categories whose pagination ended on a failed request
    pub fn failed_categories(&self) -> usize {
        self.categories.iter().filter(|c| c.fetch_failed).count()
    }
}

/// The harvest pipeline
///
/// Owns the shared HTTP client, the dedup ledger, and both sinks. Built
/// once per run from explicit values; nothing here is process-global.
pub struct Pipeline {
    settings: Settings,
    client: Client,
    ledger: DedupLedger,
    sheets: SheetSink,
}

impl Pipeline {
    /// Creates a pipeline from settings and an already-probed sheet sink
    pub fn new(settings: Settings, sheets: SheetSink) -> crate::Result<Self> {
        let client = build_http_client(&settings.scrape)?;
        Ok(Self {
            settings,
            client,
            ledger: DedupLedger::new(),
            sheets,
        })
    }

    /// Runs the full harvest for the selected categories
    ///
    /// Seeds the ledger from both sinks, then processes each category to
    /// completion before starting the next.
    ///
    /// # Arguments
    ///
    /// * `categories` - Catalog entries to process, in order
    /// * `page_limit` - Pages per category; 0 means "all", capped by the
    ///   configured per-category maximum
    pub async fn run(
        &mut self,
        categories: &[&Category],
        page_limit: u32,
    ) -> crate::Result<HarvestSummary> {
        self.seed(categories).await?;

        tracing::info!("Starting scrape for {} categories", categories.len());

        let mut summary = HarvestSummary::default();
        for category in categories {
            let outcome = self.harvest_category(category, page_limit).await?;
            tracing::info!(
                "Finished {}: {} new quotes over {} pages",
                outcome.name,
                outcome.new_quotes,
                outcome.pages_fetched
            );
            summary.categories.push(outcome);
        }

        Ok(summary)
    }

    /// Seeds the dedup ledger from both sinks for every selected category
    ///
    /// CSV files are read directly; worksheet reads go through the sheet
    /// sink, and a sink failure here drops the sheet integration for the
    /// run instead of aborting it.
    async fn seed(&mut self, categories: &[&Category]) -> crate::Result<()> {
        let export_dir = Path::new(&self.settings.output.export_dir).to_path_buf();

        for category in categories {
            let stem = category_filename(category.name);

            let csv_snapshot = load_existing(&crate::output::csv_path(&export_dir, &stem));
            self.ledger.seed_category(&stem, csv_snapshot);

            if self.sheets.is_enabled() {
                match self.sheets.prepare_category(&stem).await {
                    Ok(snapshot) => self.ledger.seed_category(&stem, snapshot),
                    Err(e) => {
                        tracing::warn!("Sheet sink dropped for this run: {}", e);
                        self.sheets.disable();
                    }
                }
            }
        }

        tracing::info!(
            "Loaded {} existing quotes across {} categories",
            self.ledger.known_count(),
            categories.len()
        );

        Ok(())
    }

    /// Processes one category to completion
    async fn harvest_category(
        &mut self,
        category: &Category,
        page_limit: u32,
    ) -> crate::Result<CategoryOutcome> {
        let display_name = normalize_category(category.name);
        let stem = category_filename(category.name);
        let export_dir = Path::new(&self.settings.output.export_dir).to_path_buf();

        // CSV sink failures are fatal to the whole run
        let mut sink = CsvSink::open(&export_dir, &stem)?;

        let page_cap = if page_limit == 0 {
            self.settings.scrape.max_pages_per_category
        } else {
            page_limit
        };

        let base_url = Url::parse(category.url)?;
        let mut outcome = CategoryOutcome {
            name: display_name.clone(),
            pages_fetched: 0,
            new_quotes: 0,
            fetch_failed: false,
        };

        let mut phase = CategoryPhase::Pending;
        let mut current_url = Some(category.url.to_string());
        let mut staged: Vec<QuoteRecord> = Vec::new();

        while let Some(url) = current_url.take() {
            if outcome.pages_fetched >= page_cap {
                break;
            }

            self.pause().await;

            advance(&mut phase, CategoryPhase::Fetching)?;
            let Some(body) = fetch_page(&self.client, &url).await.into_body() else {
                tracing::warn!("{}: request failed, keeping partial results", display_name);
                outcome.fetch_failed = true;
                advance(&mut phase, CategoryPhase::Done)?;
                break;
            };

            advance(&mut phase, CategoryPhase::Parsing)?;
            let listing = parse_listing(&body);
            if listing.skipped > 0 {
                tracing::debug!(
                    "{}: skipped {} containers on this page",
                    display_name,
                    listing.skipped
                );
            }

            advance(&mut phase, CategoryPhase::Writing)?;
            let mut new_on_page = 0u64;
            for raw in listing.quotes {
                let key = dedup_key(&raw.text);
                let Some(serial) = self.ledger.admit(&stem, &key) else {
                    continue;
                };

                let record = QuoteRecord {
                    serial,
                    thumbnail: String::new(),
                    category: display_name.clone(),
                    author: raw.author,
                    quote: raw.text,
                    translation: String::new(),
                    tags: raw.tags,
                    likes: raw.likes,
                    image: raw.image,
                };

                sink.append(&record)?;
                if self.sheets.is_enabled() {
                    staged.push(record);
                }
                new_on_page += 1;
            }

            outcome.pages_fetched += 1;
            outcome.new_quotes += new_on_page;
            tracing::debug!(
                "{}: page {} done, {} new",
                display_name,
                outcome.pages_fetched,
                new_on_page
            );

            current_url = match listing.next_page {
                Some(href) => Some(base_url.join(&href)?.to_string()),
                None => None,
            };
        }

        if !phase.is_terminal() {
            advance(&mut phase, CategoryPhase::Done)?;
        }

        if !staged.is_empty() {
            if let Err(e) = self.sheets.append_records(&stem, &staged).await {
                tracing::warn!("Sheet append failed for '{}': {} (sink dropped)", stem, e);
                self.sheets.disable();
            }
        }

        Ok(outcome)
    }

    /// Politeness pause before every page request
    ///
    /// Uniform over the configured window. This is the only intentional
    /// suspension point in the pipeline.
    async fn pause(&self) {
        let min = self.settings.scrape.delay_min_ms;
        let max = self.settings.scrape.delay_max_ms;
        let ms = {
            let mut rng = rand::thread_rng();
            rng.gen_range(min..=max)
        };
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

/// Moves a category to its next phase, rejecting off-loop transitions
fn advance(phase: &mut CategoryPhase, next: CategoryPhase) -> crate::Result<()> {
    if !phase.can_transition(next) {
        return Err(HarvestError::InvalidTransition { from: *phase, to: next });
    }
    *phase = next;
    Ok(())
}
