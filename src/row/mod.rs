//! Row Module
//!
//! Defines the fixed-width binary record format of the log file.
//!
//! ## Row Format (17 bytes, little-endian)
//!
//! ```text
//! ┌────────────┬──────────┬──────┬──────┬──────┬──────┬──────┬──────┐
//! │ Time (4)   │ AccX (2) │AccY 2│AccZ 2│GyrX 2│GyrY 2│GyrZ 2│HR (1)│
//! └────────────┴──────────┴──────┴──────┴──────┴──────┴──────┴──────┘
//!  offset 0     4          6      8      10     12     14     16
//! ```
//!
//! ### Field Semantics
//! - Time:     epoch milliseconds truncated to u32 (wraps ~49 days)
//! - Acc/Gyr:  axis value scaled by 100, stored as i16 centi-units
//! - HR:       beats per minute, 0 when no reading is available
//!
//! ### Header Row (row index 0)
//! The first row of every file reuses the same 17-byte layout for session
//! metadata instead of sensor data:
//! - byte 4:      gender flag (1 = male, 0 = other), byte 5 zero pad
//! - bytes 6..16: unused, zero
//! - byte 16:     resting heart rate instead of a live reading
//!
//! Byte 4 is therefore a union slot: gender flag on row 0, low byte of
//! accel X on every later row. Decoding picks the interpretation from the
//! row index, never from the bytes themselves.

mod record;
mod codec;

pub use record::{scale_axis, descale_axis, HeaderRow, Row, SampleRow};
pub use codec::{decode_header, decode_row, decode_sample, encode_header, encode_row, encode_sample};

/// Size of one log row in bytes
pub const ROW_SIZE: usize = 17;

/// Byte offset of the timestamp field
pub const OFFSET_TIMESTAMP: usize = 0;

/// Byte offset of the union slot (gender flag / accel X)
pub const OFFSET_UNION: usize = 4;

/// Byte offset of the heart rate field
pub const OFFSET_HEART_RATE: usize = 16;
