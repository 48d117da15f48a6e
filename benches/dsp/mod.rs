//! Benchmarks for the signal-chain modules.

mod delay;
mod envelope;
mod filter;
mod interface;
mod reverb;

pub use delay::bench_delay;
pub use envelope::bench_envelope;
pub use filter::bench_filter;
pub use interface::bench_interface;
pub use reverb::bench_reverb;
