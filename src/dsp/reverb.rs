//! Reverb - Room Simulation via Delay Networks
//!
//! Classic Schroeder reverberator: four parallel combs build echo density,
//! two series allpasses smear it into a diffuse tail.
//!
//! ```text
//! Input ──┬──→ [Comb 1] ──┐
//!         ├──→ [Comb 2] ──┤
//!         ├──→ [Comb 3] ──┼──→ (÷4) ──→ [Allpass 1] ──→ [Allpass 2] ──→ wet
//!         └──→ [Comb 4] ──┘
//!
//! out = input * (1 - level) + wet * level
//! ```
//!
//! ## Comb Filters
//!
//! ```text
//! y[n] = x[n - D] + g * y[n - D]
//! ```
//!
//! The four lengths (29.7, 37.1, 41.1, 43.7 ms) share no common factor, so
//! their echo patterns interleave instead of stacking into one resonance.
//!
//! ## Allpass Filters
//!
//! ```text
//! y[n] = -g * x[n] + w[n - D]        w[n] = x[n] + g * y[n]
//! ```
//!
//! Flat magnitude response, scrambled phase. Gain is fixed at 0.5.
//!
//! # Parameters
//!
//! - **Size**: comb feedback, 0.7 (small room) to 0.98 (hall)
//! - **Level**: dry/wet crossfade
//!
//! Buffers are sized from the sample rate once, in [`SchroederReverb::new`].
//! Nothing allocates after that. Non-finite values are never stored, so one
//! bad input sample cannot latch the tail.

use super::shaping::sanitize;

const COMB_DELAYS_MS: [f32; 4] = [29.7, 37.1, 41.1, 43.7];
const ALLPASS_DELAYS_MS: [f32; 2] = [5.0, 1.7];
const ALLPASS_GAIN: f32 = 0.5;

fn delay_samples(ms: f32, sample_rate: f32) -> usize {
    ((ms * sample_rate / 1000.0) as usize).max(1)
}

/// Feedback comb with a fixed length.
pub struct CombFilter {
    buffer: Box<[f32]>,
    write_pos: usize,
    feedback: f32,
}

impl CombFilter {
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)].into_boxed_slice(),
            write_pos: 0,
            feedback: 0.5,
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn set_feedback(&mut self, feedback: f32) {
        self.feedback = feedback.clamp(0.0, 0.99);
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.buffer[self.write_pos];
        self.buffer[self.write_pos] = sanitize(input + delayed * self.feedback);
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
        delayed
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

/// Schroeder allpass section.
pub struct AllpassFilter {
    buffer: Box<[f32]>,
    write_pos: usize,
    gain: f32,
}

impl AllpassFilter {
    pub fn new(delay_samples: usize) -> Self {
        Self {
            buffer: vec![0.0; delay_samples.max(1)].into_boxed_slice(),
            write_pos: 0,
            gain: ALLPASS_GAIN,
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let delayed = self.buffer[self.write_pos];
        let output = -self.gain * input + delayed;
        self.buffer[self.write_pos] = sanitize(input + self.gain * output);
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
        output
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

/// Schroeder reverb with 4 comb filters and 2 allpass filters
pub struct SchroederReverb {
    combs: [CombFilter; 4],
    allpasses: [AllpassFilter; 2],
    size: f32,
    level: f32,
}

impl SchroederReverb {
    pub fn new(sample_rate: f32) -> Self {
        let combs = COMB_DELAYS_MS.map(|ms| CombFilter::new(delay_samples(ms, sample_rate)));
        let allpasses =
            ALLPASS_DELAYS_MS.map(|ms| AllpassFilter::new(delay_samples(ms, sample_rate)));

        let mut reverb = Self {
            combs,
            allpasses,
            size: 0.5,
            level: 0.3,
        };
        reverb.set_size(0.5);
        reverb
    }

    /// Room size, 0..1. Scales comb feedback from 0.7 to 0.98.
    pub fn set_size(&mut self, size: f32) {
        self.size = size.clamp(0.0, 1.0);
        let feedback = 0.7 + self.size * 0.28;
        for comb in &mut self.combs {
            comb.set_feedback(feedback);
        }
    }

    /// Wet level, 0 = dry only, 1 = wet only.
    pub fn set_level(&mut self, level: f32) {
        self.level = level.clamp(0.0, 1.0);
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    /// Comb lengths in samples, in processing order.
    pub fn comb_lengths(&self) -> [usize; 4] {
        [
            self.combs[0].len(),
            self.combs[1].len(),
            self.combs[2].len(),
            self.combs[3].len(),
        ]
    }

    /// Process a single sample through the reverb
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let mut wet = 0.0;
        for comb in &mut self.combs {
            wet += comb.process(input);
        }
        wet *= 0.25;

        for allpass in &mut self.allpasses {
            wet = allpass.process(wet);
        }

        input * (1.0 - self.level) + wet * self.level
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    /// Zero every buffer and rewind every pointer.
    pub fn reset(&mut self) {
        for comb in &mut self.combs {
            comb.reset();
        }
        for allpass in &mut self.allpasses {
            allpass.reset();
        }
    }
}
