//! The fixed category catalog
//!
//! Categories are baked in at build time: an ordinal for selection, a
//! display name, and the tag-listing URL the pagination starts from. The
//! core pipeline consumes this as an opaque ordered list; nothing here is
//! derived from runtime input.

use std::collections::BTreeSet;

/// Origin that relative next-page hrefs are resolved against.
pub const SITE_ORIGIN: &str = "https://www.goodreads.com";

/// One catalog entry: a topical grouping of quotes with its listing URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Category {
    /// Selection ordinal (1-based, stable across releases)
    pub ordinal: u32,

    /// Display name as the site labels it (may carry a doubled suffix)
    pub name: &'static str,

    /// First listing page for this tag
    pub url: &'static str,
}

/// The full catalog, in menu order.
pub const CATALOG: &[Category] = &[
    Category { ordinal: 1, name: "Love Quotes", url: "https://www.goodreads.com/quotes/tag/love" },
    Category { ordinal: 2, name: "Life Quotes", url: "https://www.goodreads.com/quotes/tag/life" },
    Category { ordinal: 3, name: "Inspirational Quotes", url: "https://www.goodreads.com/quotes/tag/inspirational" },
    Category { ordinal: 4, name: "Humor Quotes", url: "https://www.goodreads.com/quotes/tag/humor" },
    Category { ordinal: 5, name: "Philosophy Quotes", url: "https://www.goodreads.com/quotes/tag/philosophy" },
    Category { ordinal: 6, name: "Inspirational Quotes Quotes", url: "https://www.goodreads.com/quotes/tag/inspirational-quotes" },
    Category { ordinal: 7, name: "God Quotes", url: "https://www.goodreads.com/quotes/tag/god" },
    Category { ordinal: 8, name: "Truth Quotes", url: "https://www.goodreads.com/quotes/tag/truth" },
    Category { ordinal: 9, name: "Wisdom Quotes", url: "https://www.goodreads.com/quotes/tag/wisdom" },
    Category { ordinal: 10, name: "Romance Quotes", url: "https://www.goodreads.com/quotes/tag/romance" },
    Category { ordinal: 11, name: "Poetry Quotes", url: "https://www.goodreads.com/quotes/tag/poetry" },
    Category { ordinal: 12, name: "Life Lessons Quotes", url: "https://www.goodreads.com/quotes/tag/life-lessons" },
    Category { ordinal: 13, name: "Death Quotes", url: "https://www.goodreads.com/quotes/tag/death" },
    Category { ordinal: 14, name: "Happiness Quotes", url: "https://www.goodreads.com/quotes/tag/happiness" },
    Category { ordinal: 15, name: "Hope Quotes", url: "https://www.goodreads.com/quotes/tag/hope" },
    Category { ordinal: 16, name: "Faith Quotes", url: "https://www.goodreads.com/quotes/tag/faith" },
    Category { ordinal: 17, name: "Inspiration Quotes", url: "https://www.goodreads.com/quotes/tag/inspiration" },
    Category { ordinal: 18, name: "Spirituality Quotes", url: "https://www.goodreads.com/quotes/tag/spirituality" },
    Category { ordinal: 19, name: "Relationships Quotes", url: "https://www.goodreads.com/quotes/tag/relationships" },
    Category { ordinal: 20, name: "Life Quotes Quotes", url: "https://www.goodreads.com/quotes/tag/life-quotes" },
    Category { ordinal: 21, name: "Motivational Quotes", url: "https://www.goodreads.com/quotes/tag/motivational" },
    Category { ordinal: 22, name: "Religion Quotes", url: "https://www.goodreads.com/quotes/tag/religion" },
    Category { ordinal: 23, name: "Love Quotes Quotes", url: "https://www.goodreads.com/quotes/tag/love-quotes" },
    Category { ordinal: 24, name: "Writing Quotes", url: "https://www.goodreads.com/quotes/tag/writing" },
    Category { ordinal: 25, name: "Success Quotes", url: "https://www.goodreads.com/quotes/tag/success" },
    Category { ordinal: 26, name: "Travel Quotes", url: "https://www.goodreads.com/quotes/tag/travel" },
    Category { ordinal: 27, name: "Motivation Quotes", url: "https://www.goodreads.com/quotes/tag/motivation" },
    Category { ordinal: 28, name: "Time Quotes", url: "https://www.goodreads.com/quotes/tag/time" },
    Category { ordinal: 29, name: "Motivational Quotes Quotes", url: "https://www.goodreads.com/quotes/tag/motivational-quotes" },
];

/// Looks up a catalog entry by ordinal.
pub fn by_ordinal(ordinal: u32) -> Option<&'static Category> {
    CATALOG.iter().find(|c| c.ordinal == ordinal)
}

/// Parses a category selection string into a set of ordinals
///
/// Accepted syntax (comma-separated): single ordinals (`3`), ranges (`1-5`,
/// reversed ranges are normalized), or mixes (`1,4-9`). Ranges clamp to the
/// `[1, max_ordinal]` window; an out-of-range single ordinal or any
/// unparsable part invalidates the whole selection.
///
/// # Returns
///
/// * `Some(set)` - At least one valid ordinal was selected
/// * `None` - Empty or invalid input
///
/// # Examples
///
/// ```
/// use quote_harvest::catalog::parse_selection;
///
/// let sel = parse_selection("1,3-5", 29).unwrap();
/// assert_eq!(sel.into_iter().collect::<Vec<_>>(), vec![1, 3, 4, 5]);
/// assert!(parse_selection("0", 29).is_none());
/// ```
pub fn parse_selection(text: &str, max_ordinal: u32) -> Option<BTreeSet<u32>> {
    let mut selected = BTreeSet::new();

    if text.trim().is_empty() {
        return None;
    }

    for part in text.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }

        if let Some((start_str, end_str)) = part.split_once('-') {
            let start: u32 = start_str.trim().parse().ok()?;
            let end: u32 = end_str.trim().parse().ok()?;
            let (start, end) = if start > end { (end, start) } else { (start, end) };
            for n in start..=end {
                if (1..=max_ordinal).contains(&n) {
                    selected.insert(n);
                }
            }
        } else {
            let n: u32 = part.parse().ok()?;
            if (1..=max_ordinal).contains(&n) {
                selected.insert(n);
            } else {
                return None;
            }
        }
    }

    if selected.is_empty() {
        None
    } else {
        Some(selected)
    }
}
