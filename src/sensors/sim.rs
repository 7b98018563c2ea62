//! Simulated sensors
//!
//! Deterministic stand-ins for real hardware, used by the demo binary and
//! the test suite. Each read advances an internal phase, so a sequence of
//! reads is reproducible for a given configuration.

use super::{AxisReading, HeartRateMonitor, MotionSensor};

/// Simulated three-axis motion source producing a slow sine sweep
pub struct SimMotion {
    /// Peak axis value in sensor units
    amplitude: f32,

    /// Phase step per read, radians
    step: f32,

    phase: f32,
    running: bool,
}

impl SimMotion {
    pub fn new(amplitude: f32, step: f32) -> Self {
        Self {
            amplitude,
            step,
            phase: 0.0,
            running: false,
        }
    }

    /// Profile resembling an accelerometer at rest plus gravity wobble
    pub fn accelerometer() -> Self {
        Self::new(1.2, 0.35)
    }

    /// Profile resembling a gyroscope during slow wrist motion
    pub fn gyroscope() -> Self {
        Self::new(40.0, 0.6)
    }
}

impl MotionSensor for SimMotion {
    fn start(&mut self) {
        self.running = true;
        self.phase = 0.0;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn read(&mut self) -> AxisReading {
        if !self.running {
            return AxisReading::default();
        }

        let p = self.phase;
        self.phase += self.step;

        AxisReading {
            x: Some(p.sin() * self.amplitude),
            y: Some(p.cos() * self.amplitude),
            z: Some((p * 0.5).sin() * self.amplitude),
        }
    }
}

/// Simulated heart-rate monitor
///
/// Reports nothing on the first read after start (a real monitor takes a
/// moment to lock on), then a small deterministic wobble around a base
/// rate.
pub struct SimHeartRate {
    /// Base rate in bpm
    base: u8,

    ticks: u32,
    running: bool,
}

impl SimHeartRate {
    pub fn new(base: u8) -> Self {
        Self {
            base,
            ticks: 0,
            running: false,
        }
    }
}

impl Default for SimHeartRate {
    fn default() -> Self {
        Self::new(72)
    }
}

impl HeartRateMonitor for SimHeartRate {
    fn start(&mut self) {
        self.running = true;
        self.ticks = 0;
    }

    fn stop(&mut self) {
        self.running = false;
    }

    fn read(&mut self) -> Option<u8> {
        if !self.running {
            return None;
        }

        let tick = self.ticks;
        self.ticks += 1;

        if tick == 0 {
            return None; // still locking on
        }

        let wobble = (tick % 7) as u8;
        Some(self.base.saturating_add(wobble))
    }
}
