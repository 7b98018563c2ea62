//! Row definitions
//!
//! Typed views of one log row, plus the axis scaling rules and the
//! comma-separated text rendering used on the transfer channel.

use crate::profile::Gender;

/// Session metadata stored as row 0 of every log file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderRow {
    /// Session start, epoch milliseconds truncated to u32
    pub timestamp: u32,

    /// Subject gender, stored as the byte-4 flag
    pub gender: Gender,

    /// Resting heart rate in bpm, 0 if unknown
    pub resting_heart_rate: u8,
}

/// One sensor sample, stored as every row after the header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRow {
    /// Sample instant, epoch milliseconds truncated to u32
    pub timestamp: u32,

    /// Heart rate in bpm, 0 when the monitor has no reading
    pub heart_rate: u8,

    /// Accelerometer axes in centi-units (value * 100)
    pub accel_x: i16,
    pub accel_y: i16,
    pub accel_z: i16,

    /// Gyroscope axes in centi-units (value * 100)
    pub gyro_x: i16,
    pub gyro_y: i16,
    pub gyro_z: i16,
}

/// A decoded log row
///
/// Row 0 is always [`Header`](Row::Header); every later row is
/// [`Sample`](Row::Sample). The two share one physical layout, so the
/// variant is chosen by row index at decode time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Row {
    /// Row index 0: session metadata
    Header(HeaderRow),

    /// Row index >= 1: live sensor data
    Sample(SampleRow),
}

// =============================================================================
// Axis Scaling
// =============================================================================

/// Scale a float axis reading to its stored i16 centi-unit value.
///
/// `v` maps to `round(v * 100)`; a missing reading maps to 0. Values
/// outside ±327.67 wrap per 16-bit integer truncation. That wraparound is
/// a known limitation of the format, kept for file compatibility.
pub fn scale_axis(value: Option<f32>) -> i16 {
    match value {
        Some(v) => (f64::from(v) * 100.0).round() as i64 as i16,
        None => 0,
    }
}

/// Recover the float axis value from its stored centi-unit form
pub fn descale_axis(raw: i16) -> f32 {
    f32::from(raw) / 100.0
}

// =============================================================================
// Channel Message Rendering
// =============================================================================

impl HeaderRow {
    /// Text form sent over the channel: `timestamp,gender,restingHR`
    pub fn to_message(&self) -> String {
        format!(
            "{},{},{}",
            self.timestamp,
            self.gender.flag(),
            self.resting_heart_rate
        )
    }
}

impl SampleRow {
    /// Text form sent over the channel:
    /// `timestamp,heartRate,accelX,accelY,accelZ,gyroX,gyroY,gyroZ`
    ///
    /// Axis fields stay in centi-units; the receiver descales.
    pub fn to_message(&self) -> String {
        format!(
            "{},{},{},{},{},{},{},{}",
            self.timestamp,
            self.heart_rate,
            self.accel_x,
            self.accel_y,
            self.accel_z,
            self.gyro_x,
            self.gyro_y,
            self.gyro_z
        )
    }
}

impl Row {
    /// Text form of either row kind
    pub fn to_message(&self) -> String {
        match self {
            Row::Header(header) => header.to_message(),
            Row::Sample(sample) => sample.to_message(),
        }
    }
}
