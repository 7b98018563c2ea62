//! Tests for the row codec
//!
//! These tests verify:
//! - The 17-byte little-endian layout, field by field
//! - Encode/decode round trips for header and sample rows
//! - The dual interpretation of byte 4 (gender flag vs accel X low byte)
//! - Axis scaling: rounding, missing readings, 16-bit wraparound
//! - Channel message rendering

use wearlog::profile::Gender;
use wearlog::row::{
    decode_header, decode_row, decode_sample, descale_axis, encode_row, scale_axis, HeaderRow,
    Row, SampleRow, OFFSET_HEART_RATE, OFFSET_TIMESTAMP, OFFSET_UNION, ROW_SIZE,
};

fn sample_row() -> SampleRow {
    SampleRow {
        timestamp: 0x0102_0304,
        heart_rate: 0xAA,
        accel_x: 0x0506,
        accel_y: 0x0708,
        accel_z: 0x090A,
        gyro_x: 0x0B0C,
        gyro_y: 0x0D0E,
        gyro_z: 0x0F10,
    }
}

// =============================================================================
// Byte Layout Tests
// =============================================================================

#[test]
fn test_sample_row_layout() {
    let bytes = encode_row(&Row::Sample(sample_row()));

    assert_eq!(bytes.len(), ROW_SIZE);
    #[rustfmt::skip]
    let expected = [
        0x04, 0x03, 0x02, 0x01, // timestamp, little-endian
        0x06, 0x05,             // accel x
        0x08, 0x07,             // accel y
        0x0A, 0x09,             // accel z
        0x0C, 0x0B,             // gyro x
        0x0E, 0x0D,             // gyro y
        0x10, 0x0F,             // gyro z
        0xAA,                   // heart rate
    ];
    assert_eq!(bytes, expected);

    // The published offsets point at the same positions
    assert_eq!(bytes[OFFSET_TIMESTAMP], 0x04);
    assert_eq!(bytes[OFFSET_UNION], 0x06);
    assert_eq!(bytes[OFFSET_HEART_RATE], 0xAA);
}

#[test]
fn test_header_row_layout() {
    let header = HeaderRow {
        timestamp: 0x1122_3344,
        gender: Gender::Male,
        resting_heart_rate: 61,
    };
    let bytes = encode_row(&Row::Header(header));

    assert_eq!(&bytes[OFFSET_TIMESTAMP..OFFSET_UNION], &[0x44, 0x33, 0x22, 0x11]);
    assert_eq!(bytes[OFFSET_UNION], 1); // gender flag
    assert_eq!(&bytes[OFFSET_UNION + 1..OFFSET_HEART_RATE], &[0u8; 11]); // pad + motion region
    assert_eq!(bytes[OFFSET_HEART_RATE], 61); // resting heart rate
}

// =============================================================================
// Round Trip Tests
// =============================================================================

#[test]
fn test_sample_round_trip() {
    let sample = sample_row();
    let decoded = decode_sample(&encode_row(&Row::Sample(sample))).unwrap();
    assert_eq!(decoded, sample);
}

#[test]
fn test_header_round_trip() {
    let header = HeaderRow {
        timestamp: 1_700_000_000,
        gender: Gender::Other,
        resting_heart_rate: 55,
    };
    let decoded = decode_header(&encode_row(&Row::Header(header))).unwrap();
    assert_eq!(decoded, header);
}

#[test]
fn test_decode_row_picks_variant_by_index() {
    let bytes = encode_row(&Row::Sample(sample_row()));

    assert!(matches!(decode_row(&bytes, 0).unwrap(), Row::Header(_)));
    assert!(matches!(decode_row(&bytes, 1).unwrap(), Row::Sample(_)));
    assert!(matches!(decode_row(&bytes, 500).unwrap(), Row::Sample(_)));
}

// =============================================================================
// Byte 4 Dual Interpretation
// =============================================================================

#[test]
fn test_header_bytes_reinterpret_as_sample() {
    let header = HeaderRow {
        timestamp: 42,
        gender: Gender::Male,
        resting_heart_rate: 70,
    };
    let bytes = encode_row(&Row::Header(header));

    // Same bytes, sample interpretation: flag byte becomes accel X low byte
    let as_sample = decode_sample(&bytes).unwrap();
    assert_eq!(as_sample.timestamp, 42);
    assert_eq!(as_sample.accel_x, 1);
    assert_eq!(as_sample.heart_rate, 70);
}

#[test]
fn test_sample_bytes_reinterpret_as_header() {
    let mut sample = sample_row();

    sample.accel_x = 1; // low byte 1 reads as the male flag
    let as_header = decode_header(&encode_row(&Row::Sample(sample))).unwrap();
    assert_eq!(as_header.gender, Gender::Male);

    sample.accel_x = 256; // low byte 0 reads as the other flag
    let as_header = decode_header(&encode_row(&Row::Sample(sample))).unwrap();
    assert_eq!(as_header.gender, Gender::Other);
}

// =============================================================================
// Length Validation
// =============================================================================

#[test]
fn test_decode_rejects_wrong_length() {
    assert!(decode_sample(&[0u8; 16]).is_err());
    assert!(decode_sample(&[0u8; 18]).is_err());
    assert!(decode_header(&[]).is_err());
    assert!(decode_row(&[0u8; 16], 1).is_err());
}

// =============================================================================
// Axis Scaling Tests
// =============================================================================

#[test]
fn test_scale_axis_rounds_to_centi_units() {
    assert_eq!(scale_axis(Some(1.0)), 100);
    assert_eq!(scale_axis(Some(1.23)), 123);
    assert_eq!(scale_axis(Some(1.237)), 124);
    assert_eq!(scale_axis(Some(-2.5)), -250);
    assert_eq!(scale_axis(Some(0.004)), 0);
    assert_eq!(scale_axis(Some(0.0)), 0);
}

#[test]
fn test_scale_axis_missing_reading_is_zero() {
    assert_eq!(scale_axis(None), 0);
    assert_eq!(scale_axis(Some(f32::NAN)), 0);
}

#[test]
fn test_scale_axis_saturates_at_format_range() {
    assert_eq!(scale_axis(Some(327.67)), i16::MAX);
    assert_eq!(scale_axis(Some(-327.68)), i16::MIN);
}

#[test]
fn test_scale_axis_wraps_past_format_range() {
    // Known format limitation: out-of-range values wrap per 16-bit
    // integer truncation instead of clamping
    assert_eq!(scale_axis(Some(400.0)), 40_000i64 as i16);
    assert_eq!(scale_axis(Some(-400.0)), -40_000i64 as i16);
}

#[test]
fn test_descale_recovers_axis_value() {
    assert_eq!(descale_axis(123), 1.23);
    assert_eq!(descale_axis(-250), -2.5);
    assert_eq!(descale_axis(0), 0.0);
    assert_eq!(descale_axis(scale_axis(None)), 0.0);
}

// =============================================================================
// Channel Message Tests
// =============================================================================

#[test]
fn test_header_message_format() {
    let header = HeaderRow {
        timestamp: 5_000,
        gender: Gender::Male,
        resting_heart_rate: 61,
    };
    assert_eq!(header.to_message(), "5000,1,61");
    assert_eq!(Row::Header(header).to_message(), "5000,1,61");
}

#[test]
fn test_sample_message_format() {
    let sample = SampleRow {
        timestamp: 6_000,
        heart_rate: 88,
        accel_x: 120,
        accel_y: -45,
        accel_z: 98,
        gyro_x: 1,
        gyro_y: 0,
        gyro_z: -3,
    };
    // timestamp, heart rate, then the axes in centi-units
    assert_eq!(sample.to_message(), "6000,88,120,-45,98,1,0,-3");
}
