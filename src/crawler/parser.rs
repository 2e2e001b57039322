//! Listing-page parser
//!
//! Turns one fetched HTML document into an ordered sequence of cleaned
//! quote tuples plus the next-page link. Extraction is per-container and
//! total: a malformed container becomes a [`Extraction::Skipped`] value and
//! the rest of the page continues; nothing here panics or raises.

use crate::text::{clean_author_name, clean_quote_text, clean_tags};
use scraper::{ElementRef, Html, Selector};

/// Quotes shorter than this (after cleaning) are parser artifacts, not
/// quotes, and are dropped.
const MIN_QUOTE_LEN: usize = 10;

/// One cleaned quote tuple, in document order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuote {
    /// Cleaned quote text
    pub text: String,

    /// Cleaned author name ("Unknown" when absent)
    pub author: String,

    /// Comma-joined cleaned tags (may be empty)
    pub tags: String,

    /// Author image URL (may be empty)
    pub image: String,

    /// Likes counter (0 when unparsable)
    pub likes: u64,
}

/// Why a quote container was dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The container has no quote-text sub-element
    MissingText,

    /// The cleaned text is empty or at most ten characters
    TooShort,
}

/// Outcome of extracting one quote container
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A usable quote
    Quote(RawQuote),

    /// Container dropped, page continues
    Skipped(SkipReason),
}

/// Everything extracted from one listing document
#[derive(Debug, Clone, Default)]
pub struct ParsedListing {
    /// Usable quotes in document order
    pub quotes: Vec<RawQuote>,

    /// href of the next-page link, absent on the last page
    pub next_page: Option<String>,

    /// Number of containers dropped on this page
    pub skipped: usize,
}

/// Parses one listing document
///
/// # Arguments
///
/// * `html` - The fetched HTML body
///
/// # Returns
///
/// The quotes found (document order), the next-page href if any, and the
/// count of containers that were dropped.
pub fn parse_listing(html: &str) -> ParsedListing {
    let document = Html::parse_document(html);
    let mut listing = ParsedListing::default();

    if let Ok(container_selector) = Selector::parse("div.quote") {
        for container in document.select(&container_selector) {
            match extract_quote(container) {
                Extraction::Quote(quote) => listing.quotes.push(quote),
                Extraction::Skipped(reason) => {
                    tracing::debug!("Skipping quote container: {:?}", reason);
                    listing.skipped += 1;
                }
            }
        }
    }

    listing.next_page = find_next_page(&document);
    listing
}

/// Extracts a single quote container
///
/// Missing optional sub-elements (author, tags, image, likes) fall back to
/// their defaults; only a missing quote-text element or an implausibly
/// short cleaned text drops the container.
pub fn extract_quote(container: ElementRef<'_>) -> Extraction {
    let text_element = Selector::parse("div.quoteText")
        .ok()
        .and_then(|sel| container.select(&sel).next());

    let Some(text_element) = text_element else {
        return Extraction::Skipped(SkipReason::MissingText);
    };

    let text = clean_quote_text(&element_text(text_element));
    if text.len() <= MIN_QUOTE_LEN {
        return Extraction::Skipped(SkipReason::TooShort);
    }

    let author = Selector::parse("span.authorOrTitle")
        .ok()
        .and_then(|sel| container.select(&sel).next())
        .map(|el| clean_author_name(&element_text(el)))
        .unwrap_or_else(|| "Unknown".to_string());

    let tags = Selector::parse("div.greyText")
        .ok()
        .and_then(|sel| container.select(&sel).next())
        .map(|el| clean_tags(&element_text(el)))
        .unwrap_or_default();

    let image = Selector::parse("img[src]")
        .ok()
        .and_then(|sel| container.select(&sel).next())
        .and_then(|el| el.value().attr("src"))
        .unwrap_or_default()
        .to_string();

    let likes = Selector::parse("div.right")
        .ok()
        .and_then(|sel| container.select(&sel).next())
        .map(|el| extract_likes(&element_text(el)))
        .unwrap_or(0);

    Extraction::Quote(RawQuote {
        text,
        author,
        tags,
        image,
        likes,
    })
}

/// Collects an element's text content, whitespace-trimmed
fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Parses a likes counter ("1,234 likes" -> 1234)
///
/// Requires the literal word "likes"; everything before it is stripped down
/// to its digits. Anything else parses as 0.
fn extract_likes(text: &str) -> u64 {
    let Some(prefix) = text.split("likes").next().filter(|_| text.contains("likes")) else {
        return 0;
    };

    let digits: String = prefix.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

/// Finds the next-page link in the document
///
/// Returns the href of the designated pagination link; its absence signals
/// the last page of the category.
fn find_next_page(document: &Html) -> Option<String> {
    let selector = Selector::parse("a.next_page").ok()?;

    document
        .select(&selector)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|href| href.to_string())
}
