//! Low-level DSP building blocks for the physical-model voice.
//!
//! Everything in here is allocation-free once constructed and safe to embed
//! directly inside voice structs. Buffers are sized from the sample rate in the
//! constructors; the per-sample methods only do arithmetic.

/// Logistic-map oscillator.
pub mod chaos;
/// Fractional circular delay line.
pub mod delay;
/// Attack/release envelope generator.
pub mod envelope;
/// Weighted sum of the delay and filter taps.
pub mod feedback;
/// Morphing state-variable filter.
pub mod filter;
/// Sine LFO producing AM/FM factors.
pub mod lfo;
/// Algorithmic tone generators.
pub mod oscillator;
/// Seeded noise source.
pub mod random;
/// Two tuned delay lines forming the resonant body.
pub mod resonator;
/// Schroeder reverberator.
pub mod reverb;
/// Stateless transfer curves.
pub mod shaping;
/// One-pole smoothers and the DC blocker.
pub mod smoothing;
/// DC + noise + tone excitation.
pub mod source;
/// Amplitude and energy followers.
pub mod tracker;

pub use envelope::{Envelope, EnvelopeStage};
pub use feedback::FeedbackMixer;
pub use filter::MorphFilter;
pub use lfo::{Modulation, ModulationState};
pub use oscillator::{Algorithm, AlgorithmicOscillator};
pub use resonator::{Resonator, ResonatorOutputs};
pub use reverb::SchroederReverb;
pub use smoothing::DcBlocker;
pub use source::Source;
