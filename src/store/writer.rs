//! Log Writer
//!
//! Appends 17-byte rows to a log file through a single lazily opened
//! handle. The handle opens on the first append and stays open across
//! appends until [`flush_and_close`](LogWriter::flush_and_close), so a
//! recording session costs one open however many rows it writes.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::row::ROW_SIZE;

/// Append-side handle for one log file
pub struct LogWriter {
    /// Target file path
    path: PathBuf,

    /// Append handle; `None` until the first append and after close
    file: Option<File>,
}

impl LogWriter {
    /// Create a writer for the given path without opening it
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            file: None,
        }
    }

    /// Path this writer appends to
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the append handle is currently open
    pub fn is_open(&self) -> bool {
        self.file.is_some()
    }

    /// Append exactly one row
    ///
    /// Opens the file in append mode on first use (creating it if absent)
    /// and keeps the handle for subsequent appends.
    pub fn append_row(&mut self, row: &[u8; ROW_SIZE]) -> Result<()> {
        let file = match self.file.as_mut() {
            Some(file) => file,
            None => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(&self.path)?;
                tracing::debug!("Opened {} for append", self.path.display());
                self.file.insert(file)
            }
        };

        file.write_all(row)?;
        Ok(())
    }

    /// Flush pending data to disk and release the handle
    ///
    /// Safe to call when the handle is already closed (no-op). The next
    /// append reopens the file and continues where it left off.
    pub fn flush_and_close(&mut self) -> Result<()> {
        if let Some(mut file) = self.file.take() {
            file.flush()?;
            file.sync_all()?;
            tracing::debug!("Flushed and closed {}", self.path.display());
        }
        Ok(())
    }
}

impl Drop for LogWriter {
    fn drop(&mut self) {
        // Drop cannot propagate errors; log and move on
        if let Err(e) = self.flush_and_close() {
            tracing::warn!("Close on drop failed for {}: {}", self.path.display(), e);
        }
    }
}
