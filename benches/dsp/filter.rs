//! Benchmarks for the morphing state-variable filter.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pmsynth::dsp::filter::MorphFilter;

use crate::BLOCK_SIZES;

pub fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/filter");
    let sample_rate = 48_000.0;

    for &size in BLOCK_SIZES {
        // Sawtooth-like ramp
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 1.0)
            .collect();

        for (name, shape) in [("lowpass", 0.0), ("bandpass", 0.5), ("highpass", 1.0), ("morph", 0.3)] {
            let mut filter = MorphFilter::new(sample_rate);
            filter.set_frequency(0.57);
            filter.set_q(0.4);
            filter.set_shape(shape);
            let mut buffer = input.clone();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    buffer.copy_from_slice(&input);
                    filter.render(black_box(&mut buffer));
                })
            });
        }
    }

    group.finish();
}
