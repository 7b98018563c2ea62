//! Configuration for wearlog
//!
//! Centralized configuration with sensible defaults. The defaults mirror the
//! device firmware this logger is compatible with: one sample row every 5
//! seconds, a 25 second file-handle watchdog, and a 128-byte send watermark
//! on the companion channel.

use std::path::PathBuf;

/// Main configuration for a logging session
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Directory holding the daily log files (`RawDataLogger-YYYYMMDD.txt`)
    pub data_dir: PathBuf,

    // -------------------------------------------------------------------------
    // Recording Configuration
    // -------------------------------------------------------------------------
    /// Period between sample rows (milliseconds)
    pub sample_interval_ms: u64,

    /// Period of the handle-closing watchdog (milliseconds)
    pub watchdog_interval_ms: u64,

    // -------------------------------------------------------------------------
    // Transfer Configuration
    // -------------------------------------------------------------------------
    /// Drain-step watermark: no send happens while the channel already has
    /// this many bytes buffered
    pub send_watermark: usize,

    /// Companion address (host:port) the device connects to
    pub companion_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./wearlog_data"),
            sample_interval_ms: 5_000,
            watchdog_interval_ms: 25_000,
            send_watermark: 128,
            companion_addr: "127.0.0.1:9760".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (where daily log files live)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the sample period (in milliseconds)
    pub fn sample_interval_ms(mut self, ms: u64) -> Self {
        self.config.sample_interval_ms = ms;
        self
    }

    /// Set the watchdog period (in milliseconds)
    pub fn watchdog_interval_ms(mut self, ms: u64) -> Self {
        self.config.watchdog_interval_ms = ms;
        self
    }

    /// Set the channel send watermark (in bytes)
    pub fn send_watermark(mut self, bytes: usize) -> Self {
        self.config.send_watermark = bytes;
        self
    }

    /// Set the companion address (host:port)
    pub fn companion_addr(mut self, addr: impl Into<String>) -> Self {
        self.config.companion_addr = addr.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
