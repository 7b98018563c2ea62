//! Log Reader
//!
//! Random-access row reads over one persistent handle. A reader snapshots
//! the file size at open; recording and reading never overlap, so the
//! snapshot stays valid for the reader's lifetime.

use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use crate::error::{Result, WearlogError};
use crate::row::{self, Row, ROW_SIZE};

/// Read-side handle for one log file
#[derive(Debug)]
pub struct LogReader {
    /// Source file path
    path: PathBuf,

    /// Persistent read handle
    file: BufReader<File>,

    /// File size in bytes, snapshotted at open
    size: u64,
}

impl LogReader {
    /// Open a log file for row reads
    ///
    /// Fails with [`WearlogError::NotFound`] when the file is absent. A
    /// size that is not a whole multiple of the row width keeps only the
    /// complete rows, warning about the partial tail.
    pub fn open(path: &Path) -> Result<Self> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(WearlogError::NotFound(path.display().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        let size = file.metadata()?.len();
        if size % ROW_SIZE as u64 != 0 {
            tracing::warn!(
                "Log {} is {} bytes, not a whole number of rows; ignoring partial tail",
                path.display(),
                size
            );
        }

        Ok(Self {
            path: path.to_path_buf(),
            file: BufReader::new(file),
            size,
        })
    }

    /// Path this reader reads from
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of complete rows available
    pub fn row_count(&self) -> u64 {
        self.size / ROW_SIZE as u64
    }

    /// Read the raw 17 bytes of the row at the given index
    pub fn read_row_at(&mut self, index: u64) -> Result<[u8; ROW_SIZE]> {
        if index >= self.row_count() {
            return Err(WearlogError::Storage(format!(
                "row index {} out of range ({} rows in {})",
                index,
                self.row_count(),
                self.path.display()
            )));
        }

        self.file.seek(SeekFrom::Start(index * ROW_SIZE as u64))?;

        let mut row = [0u8; ROW_SIZE];
        self.file.read_exact(&mut row)?;
        Ok(row)
    }

    /// Read and decode the row at the given index
    ///
    /// Index 0 decodes as the header row, everything else as a sample.
    pub fn read_row(&mut self, index: u64) -> Result<Row> {
        let bytes = self.read_row_at(index)?;
        row::decode_row(&bytes, index)
    }
}
