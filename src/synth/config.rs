#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where the LFO's frequency-modulation factor is applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FmRouting {
    /// Scale the frequency driving the source. The resonator stays on the note.
    #[default]
    SourcePitch,
    /// Scale the voice output by the FM factor, leaving every pitch alone.
    OutputScale,
}

/// Construction-time settings for an engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EngineConfig {
    pub sample_rate: f32,
    /// Size of the voice pool. Fixed for the lifetime of the engine.
    pub voices: usize,
    /// Root seed. Every noise source in every voice derives its own stream from it.
    pub seed: u64,
    pub fm_routing: FmRouting,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44_100.0,
            voices: 8,
            seed: 0x5EED,
            fm_routing: FmRouting::SourcePitch,
        }
    }
}

impl EngineConfig {
    pub fn with_sample_rate(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    pub fn voices(mut self, voices: usize) -> Self {
        self.voices = voices.max(1);
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn fm_routing(mut self, routing: FmRouting) -> Self {
        self.fm_routing = routing;
        self
    }
}
