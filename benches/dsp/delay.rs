//! Benchmarks for fractional delay lines and the dual-line resonator.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pmsynth::dsp::{delay::FractionalDelayLine, Resonator};

use crate::BLOCK_SIZES;

pub fn bench_delay(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/delay");
    let sample_rate = 48_000.0;

    for &size in BLOCK_SIZES {
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        let mut line = FractionalDelayLine::new(2_400);
        for &sample in &input {
            line.write(sample);
        }
        group.bench_with_input(BenchmarkId::new("read_linear", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for i in 0..size {
                    // slowly swept length, as when the pitch glides
                    let length = 480.0 + (i as f32 * 0.1).sin() * 48.0;
                    sum += line.read_linear(black_box(length));
                }
                sum
            })
        });

        group.bench_with_input(BenchmarkId::new("read_hermite", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for i in 0..size {
                    let length = 480.0 + (i as f32 * 0.1).sin() * 48.0;
                    sum += line.read_hermite(black_box(length));
                }
                sum
            })
        });

        let mut resonator = Resonator::new(sample_rate, 1);
        resonator.set_ratio(0.75);
        group.bench_with_input(BenchmarkId::new("resonator", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &sample in &input {
                    let taps = resonator.process(black_box(sample), black_box(220.0));
                    sum += taps.delay1 + taps.delay2;
                }
                sum
            })
        });
    }

    group.finish();
}
