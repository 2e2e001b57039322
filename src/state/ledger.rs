//! The deduplication ledger
//!
//! Tracks, per category, the set of already-seen quote keys and the highest
//! serial number issued, seeded from whatever the sinks already hold. A
//! global union of all seen keys additionally suppresses duplicates that
//! surface under a different category during the same run.
//!
//! Keys are [`crate::text::dedup_key`] values; the ledger never stores raw
//! quote text. The sinks remain the persisted state — the ledger lives and
//! dies with the process.

use std::collections::{HashMap, HashSet};

/// What a sink already holds for one category: the key set and the highest
/// serial found. Reading an empty or unreachable sink yields the default.
#[derive(Debug, Clone, Default)]
pub struct SinkSnapshot {
    /// Dedup keys of every row the sink holds
    pub keys: HashSet<String>,

    /// Highest numeric SNO seen in the sink, 0 if none
    pub last_serial: u64,
}

/// Per-category ledger state
#[derive(Debug, Clone, Default)]
pub struct CategoryLedger {
    /// Keys known for this category (seeded, then grown during the run)
    pub seen: HashSet<String>,

    /// Last serial number issued for this category
    pub last_serial: u64,
}

/// Process-wide deduplication ledger
///
/// Built once at startup from the sink snapshots, then mutated in place as
/// records are admitted. Categories are addressed by their filename stem,
/// the same identity both sinks use.
#[derive(Debug, Default)]
pub struct DedupLedger {
    categories: HashMap<String, CategoryLedger>,
    global_seen: HashSet<String>,
}

impl DedupLedger {
    /// Creates an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one category from a sink snapshot
    ///
    /// Call once per sink per category; repeated calls union the key sets
    /// and keep the maximum serial. All keys also join the global seen-set.
    pub fn seed_category(&mut self, stem: &str, snapshot: SinkSnapshot) {
        let entry = self.categories.entry(stem.to_string()).or_default();
        entry.last_serial = entry.last_serial.max(snapshot.last_serial);
        for key in snapshot.keys {
            self.global_seen.insert(key.clone());
            entry.seen.insert(key);
        }
    }

    /// Attempts to admit a freshly scraped quote
    ///
    /// The quote is admitted if and only if its key is absent from the
    /// global seen-set at this moment. On admission the category's next
    /// serial is issued and the key joins both the category's seen-set and
    /// the global one, so a later duplicate — even under another category —
    /// is rejected.
    ///
    /// # Arguments
    ///
    /// * `stem` - The category's filename stem
    /// * `key` - The quote's dedup key
    ///
    /// # Returns
    ///
    /// * `Some(serial)` - Admitted, with the serial number to persist
    /// * `None` - Duplicate, must not be persisted
    pub fn admit(&mut self, stem: &str, key: &str) -> Option<u64> {
        if self.global_seen.contains(key) {
            return None;
        }

        let entry = self.categories.entry(stem.to_string()).or_default();
        entry.last_serial += 1;
        entry.seen.insert(key.to_string());
        self.global_seen.insert(key.to_string());

        Some(entry.last_serial)
    }

    /// Last serial issued for a category (0 if the category is unknown)
    pub fn last_serial(&self, stem: &str) -> u64 {
        self.categories.get(stem).map_or(0, |c| c.last_serial)
    }

    /// Whether a key is already known anywhere
    pub fn is_known(&self, key: &str) -> bool {
        self.global_seen.contains(key)
    }

    /// Total number of distinct keys known across all categories
    pub fn known_count(&self) -> usize {
        self.global_seen.len()
    }
}
