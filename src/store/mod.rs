//! Log Store Module
//!
//! Append-only file layer over the 17-byte row format.
//!
//! ## Responsibilities
//! - Name log files by the calendar date of the recording session
//! - Append rows through one lazily opened handle ([`LogWriter`])
//! - Random-access row reads through one persistent handle ([`LogReader`])
//! - Idempotent cleanup of stale files from an earlier session
//!
//! ## File Layout
//! ```text
//! RawDataLogger-YYYYMMDD.txt
//! ┌────────────────────────────────────────┐
//! │ Row 0: header (session metadata)       │
//! ├────────────────────────────────────────┤
//! │ Row 1: first sample                    │
//! ├────────────────────────────────────────┤
//! │ ...                                    │
//! ├────────────────────────────────────────┤
//! │ Row N: last sample                     │
//! └────────────────────────────────────────┘
//! ```
//! Total size is always a multiple of 17; size / 17 = row count.

mod writer;
mod reader;

pub use writer::LogWriter;
pub use reader::LogReader;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::error::{Result, WearlogError};
use crate::row::ROW_SIZE;

/// File name for a session started on the given date
///
/// The `.txt` extension is historical; the content is binary.
pub fn log_file_name(date: NaiveDate) -> String {
    format!("RawDataLogger-{}.txt", date.format("%Y%m%d"))
}

/// Full path of the log file for the given date under a data directory
pub fn log_file_path(dir: &Path, date: NaiveDate) -> PathBuf {
    dir.join(log_file_name(date))
}

/// Delete a log file if present
///
/// A missing file is the expected case on a fresh start and is recovered
/// silently; any other failure propagates.
pub fn delete_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("Deleted stale log file {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("No stale log file at {}", path.display());
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}

/// File size in bytes
///
/// Fails with [`WearlogError::NotFound`] when the file is absent.
pub fn stat(path: &Path) -> Result<u64> {
    match fs::metadata(path) {
        Ok(meta) => Ok(meta.len()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            Err(WearlogError::NotFound(path.display().to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

/// Number of complete rows in a log file
///
/// A size that is not a whole multiple of the row width indicates a
/// truncated final row; the partial tail is ignored with a warning.
pub fn row_count(path: &Path) -> Result<u64> {
    let size = stat(path)?;
    if size % ROW_SIZE as u64 != 0 {
        tracing::warn!(
            "Log {} is {} bytes, not a whole number of rows; ignoring partial tail",
            path.display(),
            size
        );
    }
    Ok(size / ROW_SIZE as u64)
}
