//! Benchmarks for the attack/release envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pmsynth::dsp::envelope::Envelope;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let sample_rate = 48_000.0;

    for &size in BLOCK_SIZES {
        let mut env = Envelope::new(sample_rate);
        env.set_attack(0.5);
        env.set_gate(true);
        group.bench_with_input(BenchmarkId::new("attack", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for _ in 0..size {
                    sum += env.next_sample();
                }
                black_box(sum)
            })
        });

        let mut env = Envelope::new(sample_rate);
        env.set_release(1.0);
        env.set_gate(true);
        for _ in 0..1_000 {
            env.next_sample();
        }
        env.set_gate(false);
        group.bench_with_input(BenchmarkId::new("release", size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for _ in 0..size {
                    sum += env.next_sample();
                }
                black_box(sum)
            })
        });
    }

    group.finish();
}
