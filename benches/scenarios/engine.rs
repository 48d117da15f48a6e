//! Benchmarks for the polyphonic engine with a full voice pool.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use pmsynth::{frequency_from_note, Engine};

use crate::BLOCK_SIZES;

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // One held note
        let mut engine = Engine::new(48_000.0);
        engine.note_on(57, 220.0);
        group.bench_with_input(BenchmarkId::new("one_voice", size), &size, |b, _| {
            b.iter(|| engine.render(black_box(&mut buffer)))
        });

        // Every voice sounding: a two-octave stack
        let mut engine = Engine::new(48_000.0);
        for note in [36u8, 43, 48, 52, 55, 60, 64, 67] {
            engine.note_on(note, frequency_from_note(note as i32));
        }
        group.bench_with_input(BenchmarkId::new("full_pool", size), &size, |b, _| {
            b.iter(|| engine.render(black_box(&mut buffer)))
        });

        // Steady note churn forcing steals every block
        let mut engine = Engine::new(48_000.0);
        let mut note = 40u8;
        group.bench_with_input(BenchmarkId::new("stealing", size), &size, |b, _| {
            b.iter(|| {
                note = if note >= 90 { 40 } else { note + 1 };
                engine.note_on(note, frequency_from_note(note as i32));
                engine.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
