//! Scenario benchmarks: one voice, then the whole engine under load.

mod engine;
mod voices;

pub use engine::bench_engine;
pub use voices::bench_voices;
