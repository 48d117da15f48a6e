//! Benchmarks for single voices across interface techniques.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pmsynth::{
    synth::{FmRouting, Params, Voice},
    InterfaceKind, ParamId,
};

use crate::BLOCK_SIZES;

pub fn bench_voices(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/voices");
    let sample_rate = 48_000.0;

    let patches = [
        ("reed", InterfaceKind::Reed),
        ("bow", InterfaceKind::Bow),
        ("vapor", InterfaceKind::Vapor),
        ("plasma", InterfaceKind::Plasma),
    ];

    for &size in BLOCK_SIZES {
        for (name, kind) in patches {
            let mut params = Params::new();
            params.set(ParamId::InterfaceType, kind.index() as f32);
            params.set(ParamId::ModulationTypeLevel, 0.8);
            let mut voice = Voice::new(sample_rate, 7, FmRouting::SourcePitch);
            voice.note_on(45, 110.0, 1.0, 1, &params);

            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    let mut sum = 0.0f32;
                    for _ in 0..size {
                        sum += voice.process(black_box(&params));
                    }
                    sum
                })
            });
        }
    }

    group.finish();
}
