//! The persisted quote record
//!
//! One row in a category CSV file (and the matching sheet row). Field order
//! here is the single source of truth for the sink column order.

/// Column header shared by the CSV files and the sheet tabs.
pub const CSV_HEADER: [&str; 10] = [
    "SNO", "THUMB", "CATEGORY", "AUTHOR", "QUOTE", "TRANSLATE", "TAGS", "LIKES", "IMAGE", "TOTAL",
];

/// One scraped quote, fully cleaned and serial-numbered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteRecord {
    /// Serial number, contiguous and strictly increasing within a category
    pub serial: u64,

    /// Reserved thumbnail column (always empty in current scope)
    pub thumbnail: String,

    /// Normalized category display name
    pub category: String,

    /// Cleaned author name, "Unknown" when the page carries none
    pub author: String,

    /// Cleaned quote text (non-empty, longer than 10 characters)
    pub quote: String,

    /// Reserved translation column (always empty in current scope)
    pub translation: String,

    /// Comma-joined normalized tag list, possibly empty
    pub tags: String,

    /// Likes counter from the listing page, 0 when unparsable
    pub likes: u64,

    /// Author image URL, possibly empty
    pub image: String,
}

impl QuoteRecord {
    /// Character count of the quote text (the TOTAL column, derived).
    pub fn length(&self) -> usize {
        self.quote.chars().count()
    }

    /// Renders the record in sink column order.
    pub fn to_row(&self) -> Vec<String> {
        vec![
            self.serial.to_string(),
            self.thumbnail.clone(),
            self.category.clone(),
            self.author.clone(),
            self.quote.clone(),
            self.translation.clone(),
            self.tags.clone(),
            self.likes.to_string(),
            self.image.clone(),
            self.length().to_string(),
        ]
    }

    /// Renders the record as a JSON array for a sheet append payload.
    ///
    /// Numeric columns stay numeric so the sheet ends up with the same
    /// typing a human entering the values would get.
    pub fn to_sheet_row(&self) -> serde_json::Value {
        serde_json::json!([
            self.serial,
            self.thumbnail,
            self.category,
            self.author,
            self.quote,
            self.translation,
            self.tags,
            self.likes,
            self.image,
            self.length(),
        ])
    }
}
