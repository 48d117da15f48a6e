//! Dual delay-line resonator.
//!
//! Both lines receive the same input. Line 1 is tuned to the driving frequency
//! (shifted by ±12 semitones), line 2 runs at a multiple of line 1's length.
//!
//! ```text
//!   len1 = clamp(sr / (f * 2^(semitones / 12)), 2, capacity - 1)
//!   len2 = clamp(len1 * ratio,                   2, capacity - 1)
//!
//!   ratio control  0.0 ──── 0.5 ──── 1.0
//!   ratio          0.5      1.0      2.0
//! ```
//!
//! Capacity is one period of the lowest supported fundamental (20 Hz).
//! Lengths are only recomputed when the driving frequency or a tuning
//! control changes.

use super::delay::FractionalDelayLine;
use super::random::Random;

/// Lowest fundamental the buffers can hold a full period of.
pub const LOWEST_FREQUENCY: f32 = 20.0;
const MIN_LENGTH: f32 = 2.0;
const SEED_SAMPLES: usize = 100;
const SEED_AMPLITUDE: f32 = 0.01;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ResonatorOutputs {
    pub delay1: f32,
    pub delay2: f32,
}

pub struct Resonator {
    sample_rate: f32,
    line1: FractionalDelayLine,
    line2: FractionalDelayLine,
    rng: Random,
    tuning_semitones: f32,
    ratio: f32,
    length1: f32,
    length2: f32,
    frequency: f32,
}

impl Resonator {
    pub fn new(sample_rate: f32, seed: u64) -> Self {
        let capacity = ((sample_rate / LOWEST_FREQUENCY) as usize).max(8);
        Self {
            sample_rate,
            line1: FractionalDelayLine::new(capacity),
            line2: FractionalDelayLine::new(capacity),
            rng: Random::new(seed),
            tuning_semitones: 0.0,
            ratio: 1.0,
            length1: MIN_LENGTH,
            length2: MIN_LENGTH,
            frequency: 0.0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.line1.capacity()
    }

    /// Normalized tuning, 0..1 → -12..+12 semitones.
    pub fn set_tuning(&mut self, value: f32) {
        self.tuning_semitones = (value.clamp(0.0, 1.0) - 0.5) * 24.0;
        self.update_lengths();
    }

    /// Normalized line-2 ratio. 0.5 is unity.
    pub fn set_ratio(&mut self, value: f32) {
        let v = value.clamp(0.0, 1.0);
        self.ratio = if v < 0.5 {
            0.5 + v
        } else {
            1.0 + (v - 0.5) * 2.0
        };
        self.update_lengths();
    }

    pub fn ratio(&self) -> f32 {
        self.ratio
    }

    pub fn tuning_semitones(&self) -> f32 {
        self.tuning_semitones
    }

    /// Current delay lengths in samples.
    pub fn lengths(&self) -> (f32, f32) {
        (self.length1, self.length2)
    }

    /// Retune both lines for a new driving frequency.
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
        self.update_lengths();
    }

    fn update_lengths(&mut self) {
        if self.frequency <= 0.0 || !self.frequency.is_finite() {
            return;
        }
        let max_length = (self.capacity() - 1) as f32;
        let tuned = self.frequency * 2.0f32.powf(self.tuning_semitones / 12.0);
        self.length1 = (self.sample_rate / tuned).clamp(MIN_LENGTH, max_length);
        self.length2 = (self.length1 * self.ratio).clamp(MIN_LENGTH, max_length);
    }

    /// Read both taps, then write `input` into both lines.
    #[inline]
    pub fn process(&mut self, input: f32, frequency: f32) -> ResonatorOutputs {
        if frequency != self.frequency {
            self.set_frequency(frequency);
        }
        let outputs = ResonatorOutputs {
            delay1: self.line1.read_linear(self.length1),
            delay2: self.line2.read_linear(self.length2),
        };
        self.line1.write(input);
        self.line2.write(input);
        outputs
    }

    /// Clear both lines and sprinkle a little noise just behind the write head,
    /// so the first period read back is not perfectly silent and periodic.
    ///
    /// The seeds sit at ages 1..=100, so they are read back `length - age`
    /// samples after the reset: the last 100 samples of the first period. A
    /// line longer than 100 samples therefore opens with `length - 100`
    /// samples of silence before the noise arrives, and the write head
    /// never overwrites a seed before it has been read.
    pub fn reset(&mut self) {
        self.line1.reset();
        self.line2.reset();
        for age in 1..=SEED_SAMPLES.min(self.capacity() - 1) {
            let a = self.rng.white(SEED_AMPLITUDE);
            let b = self.rng.white(SEED_AMPLITUDE);
            self.line1.seed_history(age, a);
            self.line2.seed_history(age, b);
        }
    }
}
