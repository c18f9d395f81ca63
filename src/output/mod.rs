//! Output module for exporting extracted records
//!
//! One format lives here: delimited tabular text (CSV). The exporter takes
//! a single record plus the export schema from configuration and writes the
//! destination file in one pass.

mod csv_export;

pub use csv_export::{export_record, ExportError, ExportResult};
