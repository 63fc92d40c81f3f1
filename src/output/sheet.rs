//! Spreadsheet persistence
//!
//! Records are appended to a CSV file: an existing file keeps its rows and
//! new records land after them, with no deduplication. A missing or empty
//! file is created with the header row first. The file is touched once,
//! after scraping completes, so there is no concurrent access to guard.

use crate::{GameRecord, PersistError};
use std::fs::{File, OpenOptions};
use std::path::Path;

/// Result of one persist call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistSummary {
    /// Rows written by this call
    pub appended: usize,

    /// Rows in the file afterwards, excluding the header
    pub total_rows: usize,
}

/// Appends records to the spreadsheet at `path`, creating it if needed
///
/// # Arguments
///
/// * `records` - The records to append
/// * `path` - The spreadsheet file path
///
/// # Returns
///
/// * `Ok(PersistSummary)` - Rows appended and the new total
/// * `Err(PersistError)` - Failed to read or write the file
pub fn persist(records: &[GameRecord], path: &Path) -> Result<PersistSummary, PersistError> {
    let existing = if file_has_content(path)? {
        count_rows(path)?
    } else {
        0
    };

    let appending = existing > 0;

    let writer = if appending {
        OpenOptions::new().append(true).open(path)?
    } else {
        File::create(path)?
    };

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(!appending)
        .from_writer(writer);

    // serialize only emits the header alongside the first record, so an
    // empty run still needs the header written for a fresh file
    if !appending && records.is_empty() {
        csv_writer.write_record(GameRecord::HEADERS)?;
    }

    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;

    Ok(PersistSummary {
        appended: records.len(),
        total_rows: existing + records.len(),
    })
}

/// Counts the data rows in an existing spreadsheet (header excluded)
pub fn count_rows(path: &Path) -> Result<usize, PersistError> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut rows = 0;
    for record in reader.records() {
        record?;
        rows += 1;
    }

    Ok(rows)
}

fn file_has_content(path: &Path) -> Result<bool, PersistError> {
    if !path.exists() {
        return Ok(false);
    }
    Ok(std::fs::metadata(path)?.len() > 0)
}
