//! Sensors Module
//!
//! Abstractions over the pollable sensor sources feeding the recorder:
//! two motion sensors (accelerometer, gyroscope) and a heart-rate
//! monitor. Sensors are collaborators, not owned hardware drivers; a
//! reading may be absent before the first sample arrives or after the
//! source is stopped, and an absent reading encodes as zero rather than
//! erroring.

mod sim;

pub use sim::{SimHeartRate, SimMotion};

/// One instantaneous three-axis reading
///
/// Each axis is independently optional; a source that has started but not
/// yet sampled reports `None` on some or all axes.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisReading {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub z: Option<f32>,
}

/// A three-axis motion source (accelerometer or gyroscope)
pub trait MotionSensor: Send {
    /// Begin sampling
    fn start(&mut self);

    /// Stop sampling; subsequent reads report no data
    fn stop(&mut self);

    /// Current instantaneous reading
    fn read(&mut self) -> AxisReading;
}

/// A heart-rate source reporting beats per minute
pub trait HeartRateMonitor: Send {
    /// Begin sampling
    fn start(&mut self);

    /// Stop sampling; subsequent reads report no data
    fn stop(&mut self);

    /// Current heart rate, `None` until the monitor locks on
    fn read(&mut self) -> Option<u8>;
}
