//! Blown techniques. All three are memoryless transfer curves.

use super::{Drive, Strategy};
use crate::dsp::shaping::fast_tanh;

const FLUTE_LIMIT: f32 = 0.49;

/// Pressure-controlled opening: a biased tanh whose slope grows with intensity.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reed;

impl Strategy for Reed {
    fn process(&mut self, input: f32, drive: &mut Drive<'_>) -> f32 {
        let i = drive.intensity;
        let stiffness = 2.5 + i * 10.0;
        let bias = (i - 0.5) * 0.25;
        let core = fast_tanh((input + bias) * stiffness);
        (core * (0.6 + i * 0.5) - bias * 0.3).clamp(-1.0, 1.0)
    }
}

/// Soft cubic with breath noise while the gate is held. Output stays within ±0.49.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flute;

impl Strategy for Flute {
    fn process(&mut self, input: f32, drive: &mut Drive<'_>) -> f32 {
        let i = drive.intensity;
        let gate = if drive.gate { 1.0 } else { 0.0 };
        let breath = drive.rng.white(i * 0.04 * gate);
        let mixed = (input + breath) * (0.45 + i * 0.4);
        let shaped = mixed - mixed * mixed * mixed * 0.35;
        shaped.clamp(-FLUTE_LIMIT, FLUTE_LIMIT)
    }
}

/// Lip buzz: positive pressure is lifted and saturated, negative pressure is
/// compressed, then the whole thing is driven into a second saturation.
#[derive(Debug, Clone, Copy, Default)]
pub struct Brass;

impl Strategy for Brass {
    fn process(&mut self, input: f32, drive: &mut Drive<'_>) -> f32 {
        let i = drive.intensity;
        let gain = 1.5 + i * 5.0;
        let shaped = if input >= 0.0 {
            let lifted = input * gain + (0.2 + i * 0.35);
            fast_tanh(lifted.max(0.0))
        } else {
            let compressed = (-input * (gain * (0.4 + i * 0.4))).min(1.5);
            -compressed.powf(1.3) * (0.35 + (1.0 - i) * 0.25)
        };
        let buzz = fast_tanh(shaped * (1.2 + i * 1.5));
        (buzz + i * 0.05).clamp(-1.0, 1.0)
    }
}
