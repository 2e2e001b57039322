//! Output sinks for harvested quotes
//!
//! Two persistence targets share one identity scheme (the category filename
//! stem): per-category CSV files, which are authoritative and run-fatal on
//! failure, and an optional Google Sheet, which is best-effort and silently
//! drops out of the run on any failure.

mod csv_sink;
mod sheets;

pub use csv_sink::{csv_path, load_existing, CsvSink};
pub use sheets::{
    parse_service_account, spreadsheet_id_from_url, ServiceAccountKey, SheetError, SheetSink,
    SheetsClient,
};
