//! Recorder
//!
//! Owns the sensor sources and the append side of the log during a
//! recording session. The session loop drives it: `start` resets the
//! target file and writes the header row, then each timer tick snapshots
//! the sensors into one sample row.
//!
//! The recorder never schedules its own timers; tick cadence and the
//! watchdog both live in the session controller.

use std::path::Path;

use chrono::Utc;

use crate::error::{Result, WearlogError};
use crate::profile::UserProfile;
use crate::row::{self, scale_axis, HeaderRow, SampleRow};
use crate::sensors::{HeartRateMonitor, MotionSensor};
use crate::store::{self, LogWriter};

/// Current wall clock as the row timestamp: epoch milliseconds truncated
/// to u32, wrapping roughly every 49 days
pub fn now_millis() -> u32 {
    Utc::now().timestamp_millis() as u32
}

/// Sensor-to-log pipeline for one recording session
pub struct Recorder {
    /// Writer for the current (or last) recording; `None` before the
    /// first start
    writer: Option<LogWriter>,

    accel: Box<dyn MotionSensor>,
    gyro: Box<dyn MotionSensor>,
    heart: Box<dyn HeartRateMonitor>,

    /// Sample rows appended so far (header excluded)
    samples_written: u64,
}

impl Recorder {
    /// Create an idle recorder over the given sensor sources
    pub fn new(
        accel: Box<dyn MotionSensor>,
        gyro: Box<dyn MotionSensor>,
        heart: Box<dyn HeartRateMonitor>,
    ) -> Self {
        Self {
            writer: None,
            accel,
            gyro,
            heart,
            samples_written: 0,
        }
    }

    /// Begin a recording session into the given log file
    ///
    /// Deletes any stale file at the path (left over from an earlier run
    /// the same day), writes the header row from the profile, and starts
    /// the sensor sources.
    pub fn start(&mut self, path: &Path, profile: &UserProfile) -> Result<()> {
        store::delete_if_exists(path)?;
        self.samples_written = 0;

        let mut writer = LogWriter::new(path);
        let header = HeaderRow {
            timestamp: now_millis(),
            gender: profile.gender,
            resting_heart_rate: profile.resting_heart_rate_or_zero(),
        };
        writer.append_row(&row::encode_header(&header))?;
        self.writer = Some(writer);

        self.accel.start();
        self.gyro.start();
        self.heart.start();

        tracing::info!(
            "Recording to {} (gender flag {}, resting HR {})",
            path.display(),
            header.gender.flag(),
            header.resting_heart_rate
        );
        Ok(())
    }

    /// Append one sample row from the current sensor state
    ///
    /// A source with no reading yet contributes zeros, never an error.
    /// Fails only when no recording has been started.
    pub fn tick(&mut self) -> Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| WearlogError::Storage("tick without an active recording".to_string()))?;

        let accel = self.accel.read();
        let gyro = self.gyro.read();

        let sample = SampleRow {
            timestamp: now_millis(),
            heart_rate: self.heart.read().unwrap_or(0),
            accel_x: scale_axis(accel.x),
            accel_y: scale_axis(accel.y),
            accel_z: scale_axis(accel.z),
            gyro_x: scale_axis(gyro.x),
            gyro_y: scale_axis(gyro.y),
            gyro_z: scale_axis(gyro.z),
        };

        writer.append_row(&row::encode_sample(&sample))?;
        self.samples_written += 1;

        tracing::debug!(
            "Row {}: HR {}, accel {},{},{}, gyro {},{},{}",
            self.samples_written,
            sample.heart_rate,
            sample.accel_x,
            sample.accel_y,
            sample.accel_z,
            sample.gyro_x,
            sample.gyro_y,
            sample.gyro_z
        );
        Ok(())
    }

    /// End the recording session: stop sensors, flush and close the log
    pub fn stop(&mut self) -> Result<()> {
        self.accel.stop();
        self.gyro.stop();
        self.heart.stop();

        if let Some(writer) = self.writer.as_mut() {
            writer.flush_and_close()?;
            tracing::info!(
                "Recording stopped after {} samples ({})",
                self.samples_written,
                writer.path().display()
            );
        }
        Ok(())
    }

    /// Watchdog entry point: flush and release the append handle
    ///
    /// No-op when nothing is open. The next append reopens the file, so a
    /// recording in progress continues unharmed.
    pub fn flush_and_close(&mut self) -> Result<()> {
        match self.writer.as_mut() {
            Some(writer) => writer.flush_and_close(),
            None => Ok(()),
        }
    }

    /// Path of the current (or last) recording, if any
    pub fn path(&self) -> Option<&Path> {
        self.writer.as_ref().map(|writer| writer.path())
    }

    /// Sample rows appended so far (header excluded)
    pub fn samples_written(&self) -> u64 {
        self.samples_written
    }
}
