//! Shared test helpers
//!
//! Scripted collaborators standing in for the hardware and the peer
//! socket: a channel that records every send with the buffered amount it
//! saw, and sensors returning fixed readings.

#![allow(dead_code)]

use std::path::Path;
use std::sync::Arc;

use parking_lot::Mutex;

use wearlog::channel::MessageChannel;
use wearlog::error::{Result, WearlogError};
use wearlog::row::{self, HeaderRow, SampleRow};
use wearlog::sensors::{AxisReading, HeartRateMonitor, MotionSensor};
use wearlog::store::LogWriter;

// =============================================================================
// Scripted Channel
// =============================================================================

#[derive(Default)]
struct ChannelState {
    sent: Vec<String>,
    buffered: usize,
    buffered_at_send: Vec<usize>,
    fail_sends: bool,
}

/// In-memory channel that never drains on its own
///
/// Buffered bytes grow with every send (framed length, newline included)
/// and only shrink when the test calls [`drain_all`](Self::drain_all).
/// Clones share state, so a test can keep one handle while the session
/// owns another.
#[derive(Clone, Default)]
pub struct TestChannel {
    state: Arc<Mutex<ChannelState>>,
}

impl TestChannel {
    pub fn new() -> Self {
        Self::default()
    }

    /// All messages sent so far, in order
    pub fn sent(&self) -> Vec<String> {
        self.state.lock().sent.clone()
    }

    pub fn sent_count(&self) -> usize {
        self.state.lock().sent.len()
    }

    /// Buffered amount observed by each send, in order
    pub fn buffered_at_send(&self) -> Vec<usize> {
        self.state.lock().buffered_at_send.clone()
    }

    /// Simulate the socket consuming everything queued
    pub fn drain_all(&self) {
        self.state.lock().buffered = 0;
    }

    /// Pin the buffered amount to a fixed value
    pub fn set_buffered(&self, bytes: usize) {
        self.state.lock().buffered = bytes;
    }

    /// Make every subsequent send fail with a channel error
    pub fn fail_sends(&self) {
        self.state.lock().fail_sends = true;
    }
}

impl MessageChannel for TestChannel {
    fn send(&mut self, message: &str) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_sends {
            return Err(WearlogError::Channel("scripted send failure".to_string()));
        }
        let buffered = state.buffered;
        state.buffered_at_send.push(buffered);
        state.buffered += message.len() + 1;
        state.sent.push(message.to_string());
        Ok(())
    }

    fn buffered_amount(&self) -> usize {
        self.state.lock().buffered
    }
}

// =============================================================================
// Scripted Sensors
// =============================================================================

/// Motion source returning one fixed reading while started
pub struct FixedMotion {
    reading: AxisReading,
    started: bool,
}

impl FixedMotion {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            reading: AxisReading {
                x: Some(x),
                y: Some(y),
                z: Some(z),
            },
            started: false,
        }
    }

    /// A source that never produces a reading
    pub fn silent() -> Self {
        Self {
            reading: AxisReading::default(),
            started: false,
        }
    }
}

impl MotionSensor for FixedMotion {
    fn start(&mut self) {
        self.started = true;
    }

    fn stop(&mut self) {
        self.started = false;
    }

    fn read(&mut self) -> AxisReading {
        if self.started {
            self.reading
        } else {
            AxisReading::default()
        }
    }
}

/// Heart-rate source returning one fixed value while started
pub struct FixedHeartRate {
    bpm: Option<u8>,
    started: bool,
}

impl FixedHeartRate {
    pub fn new(bpm: u8) -> Self {
        Self {
            bpm: Some(bpm),
            started: false,
        }
    }

    pub fn silent() -> Self {
        Self {
            bpm: None,
            started: false,
        }
    }
}

impl HeartRateMonitor for FixedHeartRate {
    fn start(&mut self) {
        self.started = true;
    }

    fn stop(&mut self) {
        self.started = false;
    }

    fn read(&mut self) -> Option<u8> {
        if self.started {
            self.bpm
        } else {
            None
        }
    }
}

// =============================================================================
// Log File Fixtures
// =============================================================================

/// Write a complete log file: header row plus the given samples
pub fn build_log(path: &Path, header: &HeaderRow, samples: &[SampleRow]) {
    let mut writer = LogWriter::new(path);
    writer.append_row(&row::encode_header(header)).unwrap();
    for sample in samples {
        writer.append_row(&row::encode_sample(sample)).unwrap();
    }
    writer.flush_and_close().unwrap();
}

/// A sample row with recognizable field values derived from `seed`
pub fn sample_with_seed(seed: u16) -> SampleRow {
    let base = seed as i16;
    SampleRow {
        timestamp: 1_000 + u32::from(seed),
        heart_rate: (60 + seed % 100) as u8,
        accel_x: base,
        accel_y: base + 1,
        accel_z: base + 2,
        gyro_x: -base,
        gyro_y: -(base + 1),
        gyro_z: -(base + 2),
    }
}
