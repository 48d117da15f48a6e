//! Excitation source: DC + noise + tone.
//!
//! The three components are leveled independently and summed. The tone comes
//! from an [`AlgorithmicOscillator`]; the plain sawtooth reproduces the classic
//! phase-accumulated ramp, the other algorithms swap in band-limited spectra.

use super::oscillator::{Algorithm, AlgorithmicOscillator};
use super::random::Random;

pub struct Source {
    oscillator: AlgorithmicOscillator,
    rng: Random,
    algorithm: Algorithm,
    param1: f32,
    param2: f32,
    dc_level: f32,
    noise_level: f32,
    tone_level: f32,
}

impl Source {
    pub fn new(sample_rate: f32, seed: u64) -> Self {
        Self {
            oscillator: AlgorithmicOscillator::new(sample_rate),
            rng: Random::new(seed),
            algorithm: Algorithm::Sawtooth,
            param1: 0.5,
            param2: 0.5,
            dc_level: 0.5,
            noise_level: 0.15,
            tone_level: 0.0,
        }
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.algorithm = algorithm;
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn set_param1(&mut self, value: f32) {
        self.param1 = value.clamp(0.0, 1.0);
    }

    pub fn set_param2(&mut self, value: f32) {
        self.param2 = value.clamp(0.0, 1.0);
    }

    pub fn set_dc_level(&mut self, value: f32) {
        self.dc_level = value.clamp(0.0, 1.0);
    }

    pub fn set_noise_level(&mut self, value: f32) {
        self.noise_level = value.clamp(0.0, 1.0);
    }

    pub fn set_tone_level(&mut self, value: f32) {
        self.tone_level = value.clamp(0.0, 1.0);
    }

    #[inline]
    pub fn next_sample(&mut self, frequency: f32) -> f32 {
        let noise = self.rng.white(self.noise_level);
        let tone = self
            .oscillator
            .next_sample(self.algorithm, self.param1, self.param2, frequency);
        self.dc_level + noise + tone * self.tone_level
    }

    /// Zero every oscillator phase. The noise stream carries on.
    pub fn reset(&mut self) {
        self.oscillator.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dc_only_is_constant() {
        let mut source = Source::new(44_100.0, 1);
        source.set_dc_level(0.4);
        source.set_noise_level(0.0);
        source.set_tone_level(0.0);
        for _ in 0..1_000 {
            assert_eq!(source.next_sample(440.0), 0.4);
        }
    }

    #[test]
    fn noise_stays_within_level() {
        let mut source = Source::new(44_100.0, 9);
        source.set_dc_level(0.0);
        source.set_noise_level(0.25);
        source.set_tone_level(0.0);
        let mut peak = 0.0f32;
        for _ in 0..10_000 {
            peak = peak.max(source.next_sample(440.0).abs());
        }
        assert!(peak <= 0.25 && peak > 0.2);
    }

    #[test]
    fn sawtooth_tone_wraps_at_driving_frequency() {
        let sample_rate = 44_100.0;
        let mut source = Source::new(sample_rate, 2);
        source.set_dc_level(0.0);
        source.set_noise_level(0.0);
        source.set_tone_level(1.0);

        let mut previous = source.next_sample(441.0);
        let mut wraps = 0;
        for _ in 0..44_100 {
            let v = source.next_sample(441.0);
            if v < previous - 1.0 {
                wraps += 1;
            }
            previous = v;
        }
        assert!((wraps as i32 - 441).abs() <= 1, "saw wrapped {} times", wraps);
    }

    #[test]
    fn levels_are_clamped() {
        let mut source = Source::new(44_100.0, 3);
        source.set_dc_level(3.0);
        source.set_noise_level(-1.0);
        source.set_tone_level(0.0);
        assert_eq!(source.next_sample(100.0), 1.0);
    }
}
