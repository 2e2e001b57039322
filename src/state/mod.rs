//! State module for tracking harvest progress
//!
//! # Components
//!
//! - `CategoryPhase`: Tracks where a category is in its scrape loop
//!   (pending, fetching, parsing, writing, done)
//! - `DedupLedger`: Tracks already-seen quote keys and the last serial
//!   number issued, per category and globally

mod ledger;
mod phase;

// Re-export main types
pub use ledger::{CategoryLedger, DedupLedger, SinkSnapshot};
pub use phase::CategoryPhase;
