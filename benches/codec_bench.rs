//! Benchmarks for the row codec

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use wearlog::row::{decode_row, decode_sample, encode_sample, scale_axis, SampleRow};

fn sample() -> SampleRow {
    SampleRow {
        timestamp: 1_723_456_789,
        heart_rate: 71,
        accel_x: 98,
        accel_y: -12,
        accel_z: 1_003,
        gyro_x: 4_480,
        gyro_y: -2_210,
        gyro_z: 17,
    }
}

fn codec_benchmarks(c: &mut Criterion) {
    let row = sample();
    let bytes = encode_sample(&row);

    c.bench_function("encode_sample", |b| {
        b.iter(|| encode_sample(black_box(&row)))
    });

    c.bench_function("decode_sample", |b| {
        b.iter(|| decode_sample(black_box(&bytes)).unwrap())
    });

    c.bench_function("decode_row_by_index", |b| {
        b.iter(|| decode_row(black_box(&bytes), black_box(1)).unwrap())
    });

    c.bench_function("scale_axis", |b| {
        b.iter(|| scale_axis(black_box(Some(9.81))))
    });
}

criterion_group!(benches, codec_benchmarks);
criterion_main!(benches);
