//! Row codec
//!
//! Encoding and decoding between typed rows and the 17-byte wire layout.
//! All multi-byte fields are little-endian.

use bytes::{Buf, BufMut};

use crate::error::{Result, WearlogError};
use crate::profile::Gender;
use super::{
    HeaderRow, Row, SampleRow, OFFSET_HEART_RATE, OFFSET_TIMESTAMP, OFFSET_UNION, ROW_SIZE,
};

// =============================================================================
// Encoding
// =============================================================================

/// Encode either row kind into its 17-byte form
pub fn encode_row(row: &Row) -> [u8; ROW_SIZE] {
    match row {
        Row::Header(header) => encode_header(header),
        Row::Sample(sample) => encode_sample(sample),
    }
}

/// Encode a header row
///
/// The header is sparse, so fields go in at their offsets directly; the
/// pad byte and the unused motion region stay zero.
pub fn encode_header(header: &HeaderRow) -> [u8; ROW_SIZE] {
    let mut row = [0u8; ROW_SIZE];

    row[OFFSET_TIMESTAMP..OFFSET_UNION].copy_from_slice(&header.timestamp.to_le_bytes());
    row[OFFSET_UNION] = header.gender.flag();
    row[OFFSET_HEART_RATE] = header.resting_heart_rate;

    row
}

/// Encode a sample row
pub fn encode_sample(sample: &SampleRow) -> [u8; ROW_SIZE] {
    let mut row = [0u8; ROW_SIZE];
    let mut buf = &mut row[..];

    buf.put_u32_le(sample.timestamp);
    buf.put_i16_le(sample.accel_x);
    buf.put_i16_le(sample.accel_y);
    buf.put_i16_le(sample.accel_z);
    buf.put_i16_le(sample.gyro_x);
    buf.put_i16_le(sample.gyro_y);
    buf.put_i16_le(sample.gyro_z);
    buf.put_u8(sample.heart_rate);

    row
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode a row, picking the interpretation from its index in the file
///
/// Index 0 decodes as a header row, everything else as a sample row.
pub fn decode_row(bytes: &[u8], index: u64) -> Result<Row> {
    if index == 0 {
        Ok(Row::Header(decode_header(bytes)?))
    } else {
        Ok(Row::Sample(decode_sample(bytes)?))
    }
}

/// Decode bytes as a header row (row index 0 interpretation)
pub fn decode_header(bytes: &[u8]) -> Result<HeaderRow> {
    check_len(bytes)?;
    let mut time_bytes = &bytes[OFFSET_TIMESTAMP..OFFSET_UNION];

    Ok(HeaderRow {
        timestamp: time_bytes.get_u32_le(),
        gender: Gender::from_flag(bytes[OFFSET_UNION]),
        resting_heart_rate: bytes[OFFSET_HEART_RATE],
    })
}

/// Decode bytes as a sample row (row index >= 1 interpretation)
pub fn decode_sample(bytes: &[u8]) -> Result<SampleRow> {
    check_len(bytes)?;
    let mut buf = bytes;

    let timestamp = buf.get_u32_le();
    let accel_x = buf.get_i16_le();
    let accel_y = buf.get_i16_le();
    let accel_z = buf.get_i16_le();
    let gyro_x = buf.get_i16_le();
    let gyro_y = buf.get_i16_le();
    let gyro_z = buf.get_i16_le();
    let heart_rate = buf.get_u8();

    Ok(SampleRow {
        timestamp,
        heart_rate,
        accel_x,
        accel_y,
        accel_z,
        gyro_x,
        gyro_y,
        gyro_z,
    })
}

fn check_len(bytes: &[u8]) -> Result<()> {
    if bytes.len() != ROW_SIZE {
        return Err(WearlogError::Codec(format!(
            "row must be exactly {} bytes, got {}",
            ROW_SIZE,
            bytes.len()
        )));
    }
    Ok(())
}
