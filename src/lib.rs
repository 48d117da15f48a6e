//! Physical-modelling synthesizer core.
//!
//! A voice pushes an excitation (DC, noise and a tone) through a nonlinear
//! interface into a pair of tuned delay lines, filters the result and feeds it
//! back into the interface one sample later. [`synth::Engine`] runs a fixed
//! pool of such voices into a shared reverb; [`synth::MonoSynth`] is the
//! single-voice wiring with the reverb on the voice.
//!
//! Nothing on the audio path allocates, blocks or returns an error: parameters
//! clamp, selectors fall back, and non-finite values are replaced by silence.

pub mod analysis;
pub mod dsp;
pub mod interface;
pub mod synth;

pub use interface::InterfaceKind;
pub use synth::{Engine, EngineConfig, FmRouting, MonoSynth, ParamId, Params, SynthMessage};

/// Largest block the terminal host renders in one callback.
pub const MAX_BLOCK_SIZE: usize = 2048;

/// Equal-tempered frequency of a note number, A4 (69) = 440 Hz.
pub fn frequency_from_note(note: i32) -> f32 {
    440.0 * 2.0f32.powf((note - 69) as f32 / 12.0)
}
