//! CSV export of one extracted record
//!
//! Writes the configured columns as a header row, then one data row per
//! index, pairing each column's field values positionally. All referenced
//! field lists must have the same length; a mismatch is an error, never a
//! silent truncation, since unpaired values point at a selector bug.

use crate::config::ExportConfig;
use crate::crawler::PageRecord;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Column length mismatch: {0}")]
    ColumnLengthMismatch(String),
}

/// Result type for export operations
pub type ExportResult<T> = Result<T, ExportError>;

/// Writes one record to the configured CSV file
///
/// The header row holds the configured column headers in order. Data row
/// `i` holds value `i` of every column's field list. An empty record
/// produces a header-only file.
///
/// Lengths are checked before the file is created, so a mismatch never
/// leaves a partial file behind.
///
/// # Arguments
///
/// * `config` - Destination path, column schema, and record index (the
///   index is applied by the caller; this function sees one record)
/// * `record` - The record to serialize
///
/// # Returns
///
/// * `Ok(rows)` - Number of data rows written (header excluded)
/// * `Err(ExportError)` - Length mismatch or file/CSV failure
pub fn export_record(config: &ExportConfig, record: &PageRecord) -> ExportResult<usize> {
    let columns = &config.columns;

    let rows = columns
        .first()
        .map(|c| record.values(&c.field).len())
        .unwrap_or(0);

    for column in columns {
        let len = record.values(&column.field).len();
        if len != rows {
            return Err(ExportError::ColumnLengthMismatch(format!(
                "field '{}' has {} value(s) but field '{}' has {}",
                columns[0].field, rows, column.field, len
            )));
        }
    }

    let mut writer = csv::Writer::from_path(&config.path)?;

    writer.write_record(columns.iter().map(|c| c.header.as_str()))?;

    for i in 0..rows {
        writer.write_record(columns.iter().map(|c| record.values(&c.field)[i].as_str()))?;
    }

    writer.flush()?;

    debug!(
        "Wrote {} data row(s) to {}",
        rows,
        config.path.display()
    );

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_columns;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn export_config(dir: &TempDir, columns: &str) -> ExportConfig {
        ExportConfig {
            path: dir.path().join("out.csv"),
            columns: parse_columns(columns).unwrap(),
            record_index: 0,
        }
    }

    fn paired_record() -> PageRecord {
        let mut record = PageRecord::new("http://x/p1");
        record.set("title", vec!["A".to_string(), "B".to_string()]);
        record.set("price", vec!["1".to_string(), "2".to_string()]);
        record
    }

    #[test]
    fn test_export_writes_header_and_paired_rows() {
        let dir = TempDir::new().unwrap();
        let config = export_config(&dir, "Title=title,Price=price");

        let rows = export_record(&config, &paired_record()).unwrap();
        assert_eq!(rows, 2);

        let content = fs::read_to_string(&config.path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines, vec!["Title,Price", "A,1", "B,2"]);
    }

    #[test]
    fn test_export_round_trips_values_through_the_delimiter() {
        let dir = TempDir::new().unwrap();
        let config = export_config(&dir, "Title=title,Price=price");

        let mut record = PageRecord::new("http://x/p1");
        record.set("title", vec!["A".to_string()]);
        record.set("price", vec!["9.99".to_string()]);

        export_record(&config, &record).unwrap();

        let content = fs::read_to_string(&config.path).unwrap();
        let second_line = content.lines().nth(1).unwrap();
        let values: Vec<&str> = second_line.split(',').collect();
        assert_eq!(values, vec!["A", "9.99"]);
    }

    #[test]
    fn test_export_empty_record_is_header_only() {
        let dir = TempDir::new().unwrap();
        let config = export_config(&dir, "Title=title,Price=price");

        let rows = export_record(&config, &PageRecord::default()).unwrap();
        assert_eq!(rows, 0);

        let content = fs::read_to_string(&config.path).unwrap();
        assert_eq!(content.lines().collect::<Vec<_>>(), vec!["Title,Price"]);
    }

    #[test]
    fn test_export_rejects_mismatched_lengths_without_creating_file() {
        let dir = TempDir::new().unwrap();
        let config = export_config(&dir, "Title=title,Price=price");

        let mut record = PageRecord::new("http://x/p1");
        record.set("title", vec!["A".to_string(), "B".to_string()]);
        record.set("price", vec!["1".to_string()]);

        let result = export_record(&config, &record);
        match result {
            Err(ExportError::ColumnLengthMismatch(details)) => {
                assert!(details.contains("title"));
                assert!(details.contains("price"));
            }
            other => panic!("expected ColumnLengthMismatch, got {:?}", other),
        }

        assert!(!config.path.exists());
    }

    #[test]
    fn test_export_single_custom_column() {
        let dir = TempDir::new().unwrap();
        let config = export_config(&dir, "Name=title");

        let mut record = PageRecord::new("http://x/p1");
        record.set("title", vec!["A".to_string()]);
        record.set("price", vec![]);

        let rows = export_record(&config, &record).unwrap();
        assert_eq!(rows, 1);

        let content = fs::read_to_string(&config.path).unwrap();
        assert_eq!(content.lines().collect::<Vec<_>>(), vec!["Name", "A"]);
    }

    #[test]
    fn test_export_quotes_values_containing_the_delimiter() {
        let dir = TempDir::new().unwrap();
        let config = export_config(&dir, "Title=title");

        let mut record = PageRecord::new("http://x/p1");
        record.set("title", vec!["Last, First".to_string()]);

        export_record(&config, &record).unwrap();

        // Reading back through the csv parser recovers the original value
        let mut reader = csv::Reader::from_path(&config.path).unwrap();
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(&row[0], "Last, First");
    }

    #[test]
    fn test_export_overwrites_previous_file() {
        let dir = TempDir::new().unwrap();
        let config = export_config(&dir, "Title=title,Price=price");

        export_record(&config, &paired_record()).unwrap();
        export_record(&config, &PageRecord::default()).unwrap();

        let content = fs::read_to_string(&config.path).unwrap();
        assert_eq!(content.lines().count(), 1);
    }

    #[test]
    fn test_export_to_unwritable_path_is_an_error() {
        let config = ExportConfig {
            path: PathBuf::from("/nonexistent-dir/out.csv"),
            columns: parse_columns("Title=title").unwrap(),
            record_index: 0,
        };

        let result = export_record(&config, &PageRecord::default());
        assert!(matches!(result, Err(ExportError::Csv(_))));
    }
}
