//! Configuration module for Quote-Harvest
//!
//! Scraper behavior is tunable through an optional TOML file; every field
//! has a default matching the production scrape, so running without a
//! config file is the common case.
//!
//! # Example
//!
//! ```no_run
//! use quote_harvest::config::load_settings;
//! use std::path::Path;
//!
//! let settings = load_settings(Some(Path::new("harvest.toml"))).unwrap();
//! println!("Export dir: {}", settings.output.export_dir);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{OutputSettings, ScrapeSettings, Settings};

// Re-export parser functions
pub use parser::load_settings;
