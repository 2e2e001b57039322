//! Per-category CSV sink
//!
//! One file per category under the export directory, appended to across
//! runs, never truncated. The file is opened once per category and held
//! open for the category's duration; every accepted row is flushed as a
//! discrete write so an interruption loses at most the in-flight page.

use crate::record::{QuoteRecord, CSV_HEADER};
use crate::state::SinkSnapshot;
use crate::text::dedup_key;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// Builds the CSV path for a category filename stem
pub fn csv_path(export_dir: &Path, stem: &str) -> PathBuf {
    export_dir.join(format!("{stem}.csv"))
}

/// Reads an existing category CSV into a sink snapshot
///
/// Every row's QUOTE field is keyed via [`dedup_key`]; numeric SNO fields
/// raise the last-serial watermark. A missing file is an empty snapshot; a
/// damaged file yields whatever was readable, with a warning.
pub fn load_existing(path: &Path) -> SinkSnapshot {
    let mut snapshot = SinkSnapshot::default();

    if !path.exists() {
        return snapshot;
    }

    let mut reader = match csv::Reader::from_path(path) {
        Ok(reader) => reader,
        Err(e) => {
            tracing::warn!("Could not read existing CSV file {}: {}", path.display(), e);
            return snapshot;
        }
    };

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(e) => {
            tracing::warn!("Could not read CSV header in {}: {}", path.display(), e);
            return snapshot;
        }
    };
    let quote_idx = headers.iter().position(|h| h == "QUOTE");
    let sno_idx = headers.iter().position(|h| h == "SNO");

    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!("Malformed row in {}: {}", path.display(), e);
                continue;
            }
        };

        if let Some(quote) = quote_idx.and_then(|i| record.get(i)) {
            if !quote.is_empty() {
                snapshot.keys.insert(dedup_key(quote));
            }
        }
        if let Some(sno) = sno_idx.and_then(|i| record.get(i)) {
            if let Ok(sno) = sno.trim().parse::<u64>() {
                snapshot.last_serial = snapshot.last_serial.max(sno);
            }
        }
    }

    snapshot
}

/// An open, append-mode CSV sink for one category
pub struct CsvSink {
    writer: csv::Writer<std::fs::File>,
    path: PathBuf,
}

impl CsvSink {
    /// Opens (creating if necessary) the category's CSV file for appending
    ///
    /// The header row is written only when the file is newly created or
    /// empty, so repeated runs keep appending below the existing data.
    ///
    /// # Errors
    ///
    /// Any failure here is a CSV-sink failure and is fatal to the run.
    pub fn open(export_dir: &Path, stem: &str) -> crate::Result<Self> {
        std::fs::create_dir_all(export_dir)?;
        let path = csv_path(export_dir, stem);

        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        let is_empty = file.metadata()?.len() == 0;

        let mut writer = csv::Writer::from_writer(file);
        if is_empty {
            writer.write_record(CSV_HEADER)?;
            writer.flush()?;
        }

        Ok(Self { writer, path })
    }

    /// Appends one record and flushes it to disk
    pub fn append(&mut self, record: &QuoteRecord) -> crate::Result<()> {
        self.writer.write_record(record.to_row())?;
        self.writer.flush()?;
        Ok(())
    }

    /// The file this sink writes to
    pub fn path(&self) -> &Path {
        &self.path
    }
}
