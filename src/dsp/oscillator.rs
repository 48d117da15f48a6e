//! Algorithmic tone generators for the excitation stage.
//!
//! Each algorithm takes the driving frequency plus two normalized free
//! parameters. The parameters are mapped exponentially into a range that
//! suits the algorithm:
//!
//! | algorithm        | param 1                | param 2                 |
//! | ---------------- | ---------------------- | ----------------------- |
//! | Dirichlet pulse  | harmonics 1..64        | tilt -3..+15 dB         |
//! | DSF single       | decay 0..0.98          | partial ratio 0.5..4    |
//! | DSF double       | decay 0..0.96          | partial ratio 0.5..4.5  |
//! | tanh square      | drive 0.05..5          | trim 0.2..1.2           |
//! | tanh saw         | drive 0.05..4.5        | blend 0..1              |
//! | PAF              | formant 0.5..6 × f0    | bandwidth 50..3000 Hz   |
//! | modified FM      | index 0.01..8          | ratio 0.25..6           |
//! | sawtooth         | unused                 | unused                  |
//!
//! All phases are normalized to `[0, 1)` and wrapped every sample.

use std::f32::consts::TAU;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::shaping::exp_map;

const EPSILON: f32 = 1e-8;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    DirichletPulse,
    DsfSingle,
    DsfDouble,
    TanhSquare,
    TanhSaw,
    Paf,
    ModifiedFm,
    Sawtooth,
    /// Fallback for selector values outside the known range.
    Sine,
}

impl Algorithm {
    pub const COUNT: usize = 8;

    pub fn from_index(index: i32) -> Self {
        match index {
            0 => Algorithm::DirichletPulse,
            1 => Algorithm::DsfSingle,
            2 => Algorithm::DsfDouble,
            3 => Algorithm::TanhSquare,
            4 => Algorithm::TanhSaw,
            5 => Algorithm::Paf,
            6 => Algorithm::ModifiedFm,
            7 => Algorithm::Sawtooth,
            _ => Algorithm::Sine,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Algorithm::DirichletPulse => "dirichlet",
            Algorithm::DsfSingle => "dsf",
            Algorithm::DsfDouble => "dsf2",
            Algorithm::TanhSquare => "tanh-sq",
            Algorithm::TanhSaw => "tanh-saw",
            Algorithm::Paf => "paf",
            Algorithm::ModifiedFm => "modfm",
            Algorithm::Sawtooth => "saw",
            Algorithm::Sine => "sine",
        }
    }
}

#[inline]
fn step_phase(phase: f32, frequency: f32, sample_rate: f32) -> f32 {
    let next = phase + frequency / sample_rate;
    next - next.floor()
}

/// Moorer discrete summation formula, normalized by `sqrt(1 - a^2)`.
#[inline]
fn dsf(w: f32, t: f32, decay: f32) -> f32 {
    let denominator = 1.0 - 2.0 * decay * t.cos() + decay * decay;
    if denominator.abs() < EPSILON {
        return 0.0;
    }
    let numerator = w.sin() - decay * (w - t).sin();
    numerator / denominator * (1.0 - decay * decay).sqrt()
}

pub struct AlgorithmicOscillator {
    sample_rate: f32,
    phase: f32,
    mod_phase: f32,
    secondary_phase: f32,
    secondary_phase_neg: f32,
}

impl AlgorithmicOscillator {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            phase: 0.0,
            mod_phase: 0.0,
            secondary_phase: 0.0,
            secondary_phase_neg: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
        self.mod_phase = 0.0;
        self.secondary_phase = 0.0;
        self.secondary_phase_neg = 0.0;
    }

    pub fn phase(&self) -> f32 {
        self.phase
    }

    pub fn next_sample(&mut self, algorithm: Algorithm, p1: f32, p2: f32, frequency: f32) -> f32 {
        match algorithm {
            Algorithm::DirichletPulse => self.dirichlet_pulse(p1, p2, frequency),
            Algorithm::DsfSingle => self.dsf_single(p1, p2, frequency),
            Algorithm::DsfDouble => self.dsf_double(p1, p2, frequency),
            Algorithm::TanhSquare => self.tanh_square(p1, p2, frequency),
            Algorithm::TanhSaw => self.tanh_saw(p1, p2, frequency),
            Algorithm::Paf => self.paf(p1, p2, frequency),
            Algorithm::ModifiedFm => self.modified_fm(p1, p2, frequency),
            Algorithm::Sawtooth => self.sawtooth(frequency),
            Algorithm::Sine => self.sine(frequency),
        }
    }

    #[inline]
    fn advance(&mut self, frequency: f32) -> f32 {
        self.phase = step_phase(self.phase, frequency, self.sample_rate);
        self.phase
    }

    fn sine(&mut self, frequency: f32) -> f32 {
        (self.advance(frequency) * TAU).sin()
    }

    /// Naive ramp from -1 to 1, wrapping once per period.
    fn sawtooth(&mut self, frequency: f32) -> f32 {
        self.advance(frequency) * 2.0 - 1.0
    }

    fn dirichlet_pulse(&mut self, p1: f32, p2: f32, frequency: f32) -> f32 {
        let harmonics = (1.0 + p1.clamp(0.0, 1.0) * 63.0).round().max(1.0);
        let tilt_db = -3.0 + p2.clamp(0.0, 1.0) * 18.0;

        let theta = self.advance(frequency) * TAU;
        let denominator = (theta * 0.5).sin();
        let value = if denominator.abs() < EPSILON {
            1.0
        } else {
            ((2.0 * harmonics + 1.0) * theta * 0.5).sin() / denominator - 1.0
        };
        value / harmonics * 10.0f32.powf(tilt_db / 20.0)
    }

    fn dsf_single(&mut self, p1: f32, p2: f32, frequency: f32) -> f32 {
        let decay = (p1.clamp(0.0, 1.0) * 0.98).min(0.98);
        let ratio = exp_map(p2, 0.5, 4.0);

        let w = self.advance(frequency) * TAU;
        self.secondary_phase = step_phase(self.secondary_phase, frequency * ratio, self.sample_rate);
        dsf(w, self.secondary_phase * TAU, decay)
    }

    fn dsf_double(&mut self, p1: f32, p2: f32, frequency: f32) -> f32 {
        let decay = (p1.clamp(0.0, 1.0) * 0.96).min(0.96);
        let ratio = exp_map(p2, 0.5, 4.5);

        let w = self.advance(frequency) * TAU;
        self.secondary_phase = step_phase(self.secondary_phase, frequency * ratio, self.sample_rate);
        self.secondary_phase_neg =
            step_phase(self.secondary_phase_neg, frequency * ratio, self.sample_rate);

        let positive = dsf(w, self.secondary_phase * TAU, decay);
        let negative = dsf(w, -self.secondary_phase_neg * TAU, decay);
        0.5 * (positive + negative)
    }

    fn tanh_square(&mut self, p1: f32, p2: f32, frequency: f32) -> f32 {
        let drive = exp_map(p1, 0.05, 5.0);
        let trim = exp_map(p2, 0.2, 1.2);
        let carrier = (self.advance(frequency) * TAU).sin();
        (carrier * drive).tanh() * trim
    }

    fn tanh_saw(&mut self, p1: f32, p2: f32, frequency: f32) -> f32 {
        let drive = exp_map(p1, 0.05, 4.5);
        let blend = p2.clamp(0.0, 1.0);

        let square = ((self.advance(frequency) * TAU).sin() * drive).tanh();
        self.secondary_phase = step_phase(self.secondary_phase, frequency, self.sample_rate);
        let cosine = (self.secondary_phase * TAU).cos();
        let saw = square + cosine * (1.0 - square * square);
        square * (1.0 - blend) + saw * blend
    }

    fn paf(&mut self, p1: f32, p2: f32, frequency: f32) -> f32 {
        let ratio = exp_map(p1, 0.5, 6.0);
        let bandwidth = exp_map(p2, 50.0, 3_000.0);

        let modulator = (self.advance(frequency) * TAU).sin();
        self.secondary_phase = step_phase(self.secondary_phase, frequency * ratio, self.sample_rate);
        let carrier = (self.secondary_phase * TAU).sin();

        let decay = (-bandwidth / self.sample_rate).exp();
        self.mod_phase = decay * self.mod_phase + (1.0 - decay) * modulator;
        carrier * (0.6 + 0.4 * self.mod_phase)
    }

    fn modified_fm(&mut self, p1: f32, p2: f32, frequency: f32) -> f32 {
        let index = exp_map(p1, 0.01, 8.0);
        let ratio = exp_map(p2, 0.25, 6.0);

        let carrier = (self.advance(frequency) * TAU).cos();
        self.mod_phase = step_phase(self.mod_phase, frequency * ratio, self.sample_rate);
        let modulator = (self.mod_phase * TAU).cos();
        carrier * (index * (modulator - 1.0)).exp() * (-index).exp()
    }
}
