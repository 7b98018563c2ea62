//! Error types for wearlog
//!
//! Provides a unified error type for all operations.
//!
//! Sensor dropouts are deliberately *not* errors: a sensor that has not
//! produced a reading yet reports `None` and encodes as zero.

use thiserror::Error;

/// Result type alias using WearlogError
pub type Result<T> = std::result::Result<T, WearlogError>;

/// Unified error type for wearlog operations
#[derive(Debug, Error)]
pub enum WearlogError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Log Storage Errors
    // -------------------------------------------------------------------------
    #[error("storage error: {0}")]
    Storage(String),

    #[error("log file not found: {0}")]
    NotFound(String),

    #[error("log has no rows to send: {0}")]
    EmptyLog(String),

    // -------------------------------------------------------------------------
    // Row Codec Errors
    // -------------------------------------------------------------------------
    #[error("row codec error: {0}")]
    Codec(String),

    // -------------------------------------------------------------------------
    // Message Channel Errors
    // -------------------------------------------------------------------------
    #[error("channel error: {0}")]
    Channel(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("configuration error: {0}")]
    Config(String),
}

impl WearlogError {
    /// True when the error is the "file absent" case that delete-if-exists
    /// recovers from silently.
    pub fn is_not_found(&self) -> bool {
        matches!(self, WearlogError::NotFound(_))
    }

    /// True when a transfer found the log file present but without rows.
    /// Like a missing file, there is nothing to retry.
    pub fn is_empty_log(&self) -> bool {
        matches!(self, WearlogError::EmptyLog(_))
    }
}
