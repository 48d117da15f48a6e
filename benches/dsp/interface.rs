//! Benchmarks for every interface technique.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pmsynth::interface::{Interface, InterfaceKind};

pub fn bench_interface(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/interface");
    let size = 256;
    let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.07).sin() * 0.8).collect();

    for kind in InterfaceKind::ALL {
        let mut interface = Interface::new(48_000.0, 1);
        interface.set_kind(kind);
        interface.set_intensity(0.7);
        interface.set_gate(true);
        group.bench_with_input(BenchmarkId::new(kind.name(), size), &size, |b, _| {
            b.iter(|| {
                let mut sum = 0.0f32;
                for &sample in &input {
                    sum += interface.process(black_box(sample));
                }
                sum
            })
        });
    }

    group.finish();
}
