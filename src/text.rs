//! Text canonicalization for scraped quote data
//!
//! Listing pages carry inconsistently encoded punctuation, trailing
//! attributions, duplicated category labels, and assorted whitespace noise.
//! Everything in this module is a pure function over `&str`; the cleaned
//! forms are what gets persisted, and [`dedup_key`] is what identity is
//! judged by.

/// Characters that introduce a trailing attribution ("— Author, Book").
///
/// Hyphen, em dash, en dash, and horizontal bar. The quote text is cut at
/// the first occurrence of any of these.
const ATTRIBUTION_DASHES: &[char] = &['-', '\u{2014}', '\u{2013}', '\u{2015}'];

/// Punctuation stripped from both ends of a cleaned quote.
const EDGE_NOISE: &[char] = &[' ', '\t', '\n', '\r', ',', '.', ':', ';', '-'];

/// Collapses internal whitespace runs to single spaces and trims the ends.
fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalizes a category display name
///
/// Collapses whitespace, then collapses a doubled "Quotes"/"Quote" word pair
/// ("Inspirational Quotes Quotes" -> "Inspirational Quotes"). The pair must
/// be the same word, compared case-insensitively; scanning is left to right
/// and non-overlapping, so a tripled label keeps its second repeat.
///
/// # Examples
///
/// ```
/// use quote_harvest::text::normalize_category;
///
/// assert_eq!(normalize_category("Inspirational Quotes Quotes"), "Inspirational Quotes");
/// assert_eq!(normalize_category("Love  Quotes"), "Love Quotes");
/// ```
pub fn normalize_category(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let words: Vec<&str> = name.split_whitespace().collect();
    let mut kept: Vec<&str> = Vec::with_capacity(words.len());

    let mut i = 0;
    while i < words.len() {
        let word = words[i];
        let is_label = word.eq_ignore_ascii_case("quotes") || word.eq_ignore_ascii_case("quote");
        if is_label && i + 1 < words.len() && word.eq_ignore_ascii_case(words[i + 1]) {
            kept.push(word);
            i += 2; // consume the pair, do not rescan the kept word
        } else {
            kept.push(word);
            i += 1;
        }
    }

    kept.join(" ")
}

/// Derives the filename stem (and sheet title) for a category
///
/// Applies [`normalize_category`], then removes every standalone "Quotes"
/// word. An empty result falls back to the literal "Quotes" so every
/// category maps to a usable filename.
///
/// # Examples
///
/// ```
/// use quote_harvest::text::category_filename;
///
/// assert_eq!(category_filename("Love Quotes"), "Love");
/// assert_eq!(category_filename("Quotes"), "Quotes");
/// ```
pub fn category_filename(name: &str) -> String {
    let normalized = normalize_category(name);

    let stripped: Vec<&str> = normalized
        .split_whitespace()
        .filter(|w| !w.eq_ignore_ascii_case("quotes"))
        .collect();

    let stem = stripped.join(" ");
    if stem.is_empty() {
        "Quotes".to_string()
    } else {
        stem
    }
}

/// Cleans raw quote text extracted from a listing page
///
/// # Cleaning Steps
///
/// 1. Truncate at the first dash-like character (this drops the trailing
///    "— Author, Book" attribution the site embeds in the text element)
/// 2. Replace curly quotes, ellipsis, and en/em dashes with ASCII forms
/// 3. Drop any remaining non-ASCII character
/// 4. Trim whitespace and surrounding quote characters
/// 5. Trim noise punctuation (commas, periods, colons, semicolons, hyphens)
///    from both ends
/// 6. Collapse internal whitespace runs to single spaces
pub fn clean_quote_text(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    // Step 1: cut at the first attribution dash
    let text = match raw.find(ATTRIBUTION_DASHES) {
        Some(idx) => &raw[..idx],
        None => raw,
    };

    // Step 2: normalize typographic punctuation to ASCII
    let mut text = text
        .replace(['\u{201C}', '\u{201D}'], "\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
        .replace('\u{2026}', "...")
        .replace(['\u{2013}', '\u{2014}'], "-");

    // Step 3: anything still non-ASCII is dropped outright
    text.retain(|c| c.is_ascii());

    // Step 4: outer whitespace and quote characters
    let text = text.trim().trim_matches(['"', '\'']);

    // Step 5: edge noise punctuation
    let text = text.trim_matches(EDGE_NOISE);

    // Step 6: internal whitespace
    collapse_whitespace(text)
}

/// Cleans an author name
///
/// Trims whitespace and quote characters, replaces runs of `=`, `,`, `.`
/// and `-` with single spaces, and collapses whitespace. An empty result
/// becomes "Unknown".
///
/// # Examples
///
/// ```
/// use quote_harvest::text::clean_author_name;
///
/// assert_eq!(clean_author_name("J.K. Rowling,"), "J K Rowling");
/// assert_eq!(clean_author_name(""), "Unknown");
/// ```
pub fn clean_author_name(raw: &str) -> String {
    if raw.is_empty() {
        return "Unknown".to_string();
    }

    let trimmed = raw.trim().trim_matches(['"', '\'']);

    let mut out = String::with_capacity(trimmed.len());
    let mut in_punct_run = false;
    for c in trimmed.chars() {
        if matches!(c, '=' | ',' | '.' | '-') {
            if !in_punct_run {
                out.push(' ');
                in_punct_run = true;
            }
        } else {
            out.push(c);
            in_punct_run = false;
        }
    }

    let collapsed = collapse_whitespace(&out);
    if collapsed.is_empty() {
        "Unknown".to_string()
    } else {
        collapsed
    }
}

/// Cleans a raw tags string into a comma-joined list
///
/// Strips a literal leading "tags:" label, splits on commas, trims each
/// piece, drops empties, and rejoins with ", ".
pub fn clean_tags(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let body = raw.strip_prefix("tags:").unwrap_or(raw).trim();

    body.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Builds the deduplication key for a quote text
///
/// Lowercases, collapses internal whitespace, and trims. The key is used
/// only for comparison and is never persisted. Idempotent:
/// `dedup_key(dedup_key(t)) == dedup_key(t)`.
pub fn dedup_key(text: &str) -> String {
    collapse_whitespace(&text.to_lowercase())
}
