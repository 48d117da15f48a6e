//! Struck and plucked techniques: the excitation arrives as a transient.

use std::f32::consts::TAU;

use super::{Drive, Strategy};
use crate::dsp::shaping::{fast_tanh, signed_pow, sine_fold};
use crate::dsp::tracker::EnergyAccumulator;

const PLUCK_PEAK_DECAY: f32 = 0.999;

/// Peak follower that passes new peaks straight through and brightens the rest
/// with a first difference.
#[derive(Debug, Clone, Default)]
pub struct Pluck {
    last_peak: f32,
    previous_input: f32,
}

impl Strategy for Pluck {
    fn process(&mut self, input: f32, drive: &mut Drive<'_>) -> f32 {
        let i = drive.intensity;
        let response = if input.abs() > self.last_peak.abs() {
            self.last_peak = input;
            input
        } else {
            self.last_peak *= PLUCK_PEAK_DECAY;
            let brightness = 0.2 + i * 0.45;
            let damp = 0.35 + (1.0 - i) * 0.45;
            input * damp + (input - self.previous_input) * brightness
        };
        self.previous_input = input;
        response.clamp(-1.0, 1.0)
    }

    fn reset(&mut self) {
        self.last_peak = 0.0;
        self.previous_input = 0.0;
    }
}

/// Sine wavefolder followed by a hardness curve. Stateless.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hit;

impl Strategy for Hit {
    fn process(&mut self, input: f32, drive: &mut Drive<'_>) -> f32 {
        let i = drive.intensity;
        let folded = sine_fold(input, 2.0 + i * 8.0);
        signed_pow(folded, 0.35 + i * 0.55).clamp(-1.0, 1.0)
    }
}

/// Inharmonic partials: a phase-shifted "even" partial set plus a fixed "odd" one.
#[derive(Debug, Clone, Default)]
pub struct Bell {
    phase: f32,
}

impl Strategy for Bell {
    fn process(&mut self, input: f32, drive: &mut Drive<'_>) -> f32 {
        let i = drive.intensity;
        self.phase += 0.1 + i * 0.25;
        if self.phase > TAU {
            self.phase -= TAU;
        }
        let spread = 6.0 + i * 14.0;
        let even = (input * spread + self.phase).sin() * (0.4 + i * 0.4);
        let odd = (input * (spread * 0.5 + 2.0)).sin() * (0.2 + i * 0.3);
        fast_tanh((even + odd) * (1.1 + i * 0.6)).clamp(-1.0, 1.0)
    }

    fn reset(&mut self) {
        self.phase = 0.0;
    }
}

/// Saturated hit with a leaky energy term pushing the output away from zero.
#[derive(Debug, Clone)]
pub struct Drum {
    energy: EnergyAccumulator,
}

impl Default for Drum {
    fn default() -> Self {
        Self {
            energy: EnergyAccumulator::new(0.6),
        }
    }
}

impl Strategy for Drum {
    fn process(&mut self, input: f32, drive: &mut Drive<'_>) -> f32 {
        let i = drive.intensity;
        let noise = drive.rng.white(0.02 + i * 0.06);
        self.energy.set_decay(0.7 - i * 0.2);
        let energy = self.energy.next_sample(input, 0.6 + i * 0.7);

        let hit = (input * (1.2 + i * 2.2)).tanh() + noise;
        let sign = if hit >= 0.0 { 1.0 } else { -1.0 };
        let output = hit * (0.4 + i * 0.4) + sign * (energy * 0.6).min(0.8);
        output.clamp(-1.0, 1.0)
    }

    fn reset(&mut self) {
        self.energy.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::random::Random;

    fn run(strategy: &mut impl Strategy, input: f32, intensity: f32) -> f32 {
        let mut rng = Random::new(0);
        let mut drive = Drive {
            intensity,
            gate: true,
            rng: &mut rng,
        };
        strategy.process(input, &mut drive)
    }

    #[test]
    fn pluck_passes_new_peaks_through() {
        let mut pluck = Pluck::default();
        assert_eq!(run(&mut pluck, 0.6, 0.5), 0.6);
        // smaller input: damped plus transient
        let damped = run(&mut pluck, 0.3, 0.5);
        let expected = 0.3 * (0.35 + 0.5 * 0.45) + (0.3 - 0.6) * (0.2 + 0.5 * 0.45);
        assert!((damped - expected).abs() < 1e-6);
    }

    #[test]
    fn hit_is_odd_and_stateless() {
        let mut hit = Hit;
        let a = run(&mut hit, 0.2, 0.7);
        let b = run(&mut hit, -0.2, 0.7);
        assert!((a + b).abs() < 1e-6);
        assert_eq!(run(&mut hit, 0.2, 0.7), a);
    }

    #[test]
    fn drum_energy_builds_with_input() {
        let mut drum = Drum::default();
        for _ in 0..10 {
            run(&mut drum, 0.5, 0.5);
        }
        assert!(drum.energy.energy() > 0.5);
        drum.reset();
        assert_eq!(drum.energy.energy(), 0.0);
    }

    #[test]
    fn drum_energy_follows_intensity_scaled_leak() {
        let mut drum = Drum::default();
        // intensity 0.5: decay 0.6, weight 0.95
        run(&mut drum, -0.5, 0.5);
        assert!((drum.energy.energy() - 0.475).abs() < 1e-6);
        run(&mut drum, 0.5, 0.5);
        assert!((drum.energy.energy() - (0.475 * 0.6 + 0.475)).abs() < 1e-6);

        // full intensity leaks faster: decay 0.5, weight 1.3
        drum.reset();
        run(&mut drum, 1.0, 1.0);
        run(&mut drum, 0.0, 1.0);
        assert!((drum.energy.energy() - 0.65).abs() < 1e-6);
    }
}
