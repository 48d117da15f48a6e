//! Techniques with no acoustic counterpart.

use std::f32::consts::TAU;

use super::{Drive, Strategy};
use crate::dsp::chaos::ChaoticOscillator;
use crate::dsp::shaping::{cubic_waveshaper, soft_clip};
use crate::dsp::tracker::AmplitudeTracker;

const PHI: f32 = 1.618_034;
const PHI_SQUARED: f32 = PHI * PHI;

/// Three leaky integrators at golden-ratio weights modulate copies of the input,
/// which are then cross-multiplied.
#[derive(Debug, Clone, Default)]
pub struct Crystal {
    phases: [f32; 3],
}

impl Strategy for Crystal {
    fn process(&mut self, input: f32, drive: &mut Drive<'_>) -> f32 {
        let i = drive.intensity;
        self.phases[0] = self.phases[0] * 0.98 + input;
        self.phases[1] = self.phases[1] * 0.95 + input * PHI;
        self.phases[2] = self.phases[2] * 0.92 + input * PHI_SQUARED;

        let [p1, p2, p3] = self.phases.map(|phase| input * (1.0 + phase * 0.3));
        let coupled =
            (p1 + p2 + p3) / 3.0 + i * 0.3 * (p1 * p2 + p2 * p3 + p1 * p3) * 0.1;
        cubic_waveshaper(coupled, i * 0.2).clamp(-1.0, 1.0)
    }

    fn reset(&mut self) {
        self.phases = [0.0; 3];
    }
}

/// Turbulence from three slightly detuned logistic maps, with a short recursive tap.
#[derive(Debug, Clone)]
pub struct Vapor {
    maps: [ChaoticOscillator; 3],
    previous: [f32; 2],
}

impl Default for Vapor {
    fn default() -> Self {
        Self {
            maps: [
                ChaoticOscillator::new(3.7),
                ChaoticOscillator::new(3.8),
                ChaoticOscillator::new(3.9),
            ],
            previous: [0.0; 2],
        }
    }
}

impl Strategy for Vapor {
    fn process(&mut self, input: f32, drive: &mut Drive<'_>) -> f32 {
        let i = drive.intensity;
        let r = 2.5 + i * 1.5;
        let mut chaos = 0.0;
        for (k, map) in self.maps.iter_mut().enumerate() {
            map.set_r(r + k as f32 * 0.1);
            chaos += map.next_sample(0.3);
        }

        let amount = i * 0.6;
        let mixed = input * (1.0 - amount * 0.5) + chaos * amount;
        let feedback = (self.previous[0] * 0.3 + self.previous[1] * 0.2) * amount;
        let output = soft_clip(mixed + feedback, 1.2);

        self.previous = [output, self.previous[0]];
        output.clamp(-1.0, 1.0)
    }

    fn reset(&mut self) {
        for map in &mut self.maps {
            map.reset();
        }
        self.previous = [0.0; 2];
    }
}

/// Bit-depth reduction, 8 bits at zero intensity down to 3 bits at full, with
/// dither on samples that land near a quantization boundary.
#[derive(Debug, Clone, Copy, Default)]
pub struct Quantum;

impl Quantum {
    pub fn bit_depth(intensity: f32) -> i32 {
        8 - (intensity * 5.0).floor() as i32
    }
}

impl Strategy for Quantum {
    fn process(&mut self, input: f32, drive: &mut Drive<'_>) -> f32 {
        let i = drive.intensity;
        let levels = 2.0f32.powi(Self::bit_depth(i));
        let scaled = input * levels;
        let rounded = scaled.round();
        let dither = if (scaled - rounded).abs() > 0.45 {
            drive.rng.white(0.01 * i)
        } else {
            0.0
        };
        (rounded / levels + dither).clamp(-1.0, 1.0)
    }
}

/// Amplitude-dependent first-order allpass with a phase-modulated overtone.
#[derive(Debug, Clone)]
pub struct Plasma {
    tracker: AmplitudeTracker,
    phase: f32,
    x1: f32,
    y1: f32,
}

impl Plasma {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            tracker: AmplitudeTracker::new(0.001, sample_rate),
            phase: 0.0,
            x1: 0.0,
            y1: 0.0,
        }
    }
}

impl Strategy for Plasma {
    fn process(&mut self, input: f32, drive: &mut Drive<'_>) -> f32 {
        let i = drive.intensity;
        let amplitude = self.tracker.next_sample(input);

        self.phase += 0.1 * (1.0 + i * 0.3 * amplitude);
        if self.phase > TAU {
            self.phase -= TAU;
        }

        let overtone = self.phase.sin() * amplitude * i * 0.5;
        let c = 0.3 + amplitude * i * 0.4;
        let dispersed = c * input + self.x1 - c * self.y1;
        self.x1 = input;
        self.y1 = dispersed;

        let mut output = dispersed + overtone;
        if i > 0.5 {
            output = cubic_waveshaper(output, (i - 0.5) * 0.4);
        }
        output.clamp(-1.0, 1.0)
    }

    fn reset(&mut self) {
        self.tracker.reset();
        self.phase = 0.0;
        self.x1 = 0.0;
        self.y1 = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::random::Random;

    #[test]
    fn quantum_bit_depth_steps_with_intensity() {
        assert_eq!(Quantum::bit_depth(0.0), 8);
        assert_eq!(Quantum::bit_depth(0.5), 6);
        assert_eq!(Quantum::bit_depth(1.0), 3);
    }

    #[test]
    fn quantum_snaps_to_grid() {
        let mut rng = Random::new(0);
        let mut drive = Drive {
            intensity: 1.0,
            gate: true,
            rng: &mut rng,
        };
        // 3 bits: steps of 1/8
        let out = Quantum.process(0.26, &mut drive);
        assert_eq!(out, 0.25);
    }

    #[test]
    fn vapor_at_zero_intensity_is_a_soft_clip() {
        let mut rng = Random::new(0);
        let mut drive = Drive {
            intensity: 0.0,
            gate: true,
            rng: &mut rng,
        };
        let mut vapor = Vapor::default();
        assert_eq!(vapor.process(0.5, &mut drive), soft_clip(0.5, 1.2));
    }

    #[test]
    fn crystal_reset_clears_integrators() {
        let mut rng = Random::new(0);
        let mut drive = Drive {
            intensity: 0.5,
            gate: true,
            rng: &mut rng,
        };
        let mut crystal = Crystal::default();
        let first = crystal.process(0.2, &mut drive);
        crystal.process(0.2, &mut drive);
        crystal.reset();
        assert_eq!(crystal.process(0.2, &mut drive), first);
    }
}
