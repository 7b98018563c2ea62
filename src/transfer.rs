//! Transfer Engine
//!
//! Drains a finished log file over the message channel without
//! overrunning the peer's buffer.
//!
//! ## Drain Protocol
//! ```text
//! begin:  stat file → rows_total = size / 17
//!         send row 0 as the header message
//!         ┌──────────────────────────────────────────────┐
//! drain:  │ while buffered < watermark && sent < total:  │
//!         │     read row[sent], send, sent += 1          │◄─┐
//!         └──────────────────────────────────────────────┘  │
//!                                 channel Drained event ────┘
//! ```
//! Each drain step queues rows until the channel's buffered-byte count
//! reaches the watermark, then yields; the channel's drain notification
//! re-enters the loop. Rows go out in strictly ascending index order,
//! header first.

use std::path::Path;

use crate::channel::MessageChannel;
use crate::error::{Result, WearlogError};
use crate::store::LogReader;

/// Outcome of one drain step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainStatus {
    /// Rows remain; waiting on the channel to drain
    Sending,

    /// Every row has been queued; the transfer is over
    Complete,
}

/// Sequential, flow-controlled file drain
///
/// Holds the read handle only while a transfer is active. Safe to poke
/// with [`continue_sending`](Self::continue_sending) at any time; with no
/// active transfer it reports `Complete` without touching anything.
pub struct TransferEngine {
    /// Read handle, present only during an active transfer
    reader: Option<LogReader>,

    /// Rows already queued on the channel, header included
    rows_sent: u64,

    /// Total rows in the file being drained
    rows_total: u64,

    /// Buffered-bytes threshold that pauses the drain loop
    watermark: usize,
}

impl TransferEngine {
    /// Create an idle engine with the given buffered-bytes watermark
    pub fn new(watermark: usize) -> Self {
        Self {
            reader: None,
            rows_sent: 0,
            rows_total: 0,
            watermark,
        }
    }

    /// Start draining the given log file
    ///
    /// Sends the header message (`timestamp,gender,restingHR`) and then
    /// runs the first drain step. Fails if the file is missing or has no
    /// rows; in that case the engine stays idle.
    pub fn begin(&mut self, path: &Path, channel: &mut dyn MessageChannel) -> Result<DrainStatus> {
        let mut reader = LogReader::open(path)?;
        let rows_total = reader.row_count();
        if rows_total == 0 {
            return Err(WearlogError::EmptyLog(path.display().to_string()));
        }

        let header = reader.read_row(0)?;
        channel.send(&header.to_message())?;

        self.reader = Some(reader);
        self.rows_total = rows_total;
        self.rows_sent = 1;

        tracing::info!("Transfer started: {} rows from {}", rows_total, path.display());

        self.continue_sending(channel)
    }

    /// Run one drain step
    ///
    /// Queues rows while the channel's buffered amount stays under the
    /// watermark and rows remain. Idempotent: with no active transfer
    /// this is a no-op reporting `Complete`.
    pub fn continue_sending(&mut self, channel: &mut dyn MessageChannel) -> Result<DrainStatus> {
        let reader = match self.reader.as_mut() {
            Some(reader) => reader,
            None => return Ok(DrainStatus::Complete),
        };

        while channel.buffered_amount() < self.watermark && self.rows_sent < self.rows_total {
            let row = reader.read_row(self.rows_sent)?;
            channel.send(&row.to_message())?;
            self.rows_sent += 1;
        }

        if self.rows_sent >= self.rows_total {
            tracing::info!("Transfer complete: {} rows sent", self.rows_sent);
            self.reader = None;
            return Ok(DrainStatus::Complete);
        }

        tracing::debug!(
            "Drain step paused at {}/{} rows ({:.2}%)",
            self.rows_sent,
            self.rows_total,
            self.progress_percent()
        );
        Ok(DrainStatus::Sending)
    }

    /// Drop the active transfer, if any, without completing it
    pub fn abort(&mut self) {
        if self.reader.take().is_some() {
            tracing::warn!(
                "Transfer aborted at {}/{} rows",
                self.rows_sent,
                self.rows_total
            );
        }
    }

    /// Whether a transfer is in progress
    pub fn is_active(&self) -> bool {
        self.reader.is_some()
    }

    /// Rows queued so far and total rows of the active (or last) transfer
    pub fn progress(&self) -> (u64, u64) {
        (self.rows_sent, self.rows_total)
    }

    /// Progress as a percentage for display
    pub fn progress_percent(&self) -> f64 {
        if self.rows_total == 0 {
            return 0.0;
        }
        (self.rows_sent as f64 / self.rows_total as f64) * 100.0
    }
}
