/*
AR Envelope
===========

Two stages, one gate. The envelope multiplies the excitation before it enters
the nonlinear interface, so it shapes how hard the resonator is driven rather
than the final output level.

Vocabulary
----------

  level       Current output value, 0.0 to 1.0.

  gate        Note on/off. Gate high selects Attack, gate low selects Release.
              Release always starts from the current level, so releasing in
              the middle of an attack does not click.

  tau         Time constant in seconds. After one tau an exponential segment
              has covered 63% of the distance to its target.


The Shape: Exponential Segments
-------------------------------

  Level
    1.0 ┐      ____________
        │    /             \
        │   /               \
        │  /                 `.
    0.0 └─/────────────────────`-.___──→ Time
         Attack               Release

Attack approaches 1.0 along a one-pole curve:

    level += (1 - level) * (1 - a)        a = exp(-1 / (attack_tau * sample_rate))

Release decays geometrically toward 0.0:

    level *= r                            r = exp(-1 / (release_tau * sample_rate))

Reaching 0.99 in attack takes ln(100) ≈ 4.6 taus. Falling to 1e-4 in release
takes ln(1e4) ≈ 9.2 taus.


Parameter Mapping
-----------------

Both times come from normalized controls through an exponential map:

    attack_tau  = 1 ms  * 1000^x     (1 ms .. 1 s)
    release_tau = 10 ms * 500^x      (10 ms .. 5 s)

Once the release has decayed under SILENCE_THRESHOLD the envelope reports
`is_playing() == false`, which the voice uses as its primary tail signal.
*/

use super::smoothing::pole_coefficient;

/// Release level under which the envelope counts as finished.
pub const SILENCE_THRESHOLD: f32 = 1e-5;

const ATTACK_MIN: f32 = 0.001;
const ATTACK_MAX: f32 = 1.0;
const RELEASE_MIN: f32 = 0.01;
const RELEASE_MAX: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeStage {
    Attack,
    Release,
}

pub struct Envelope {
    sample_rate: f32,
    attack_time: f32,  // seconds (tau)
    release_time: f32, // seconds (tau)
    attack_coeff: f32,
    release_coeff: f32,

    stage: EnvelopeStage,
    gate: bool,
    level: f32,
}

impl Envelope {
    pub fn new(sample_rate: f32) -> Self {
        let mut env = Self {
            sample_rate,
            attack_time: 0.01,
            release_time: 0.1,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            stage: EnvelopeStage::Release,
            gate: false,
            level: 0.0,
        };
        env.update_coefficients();
        env
    }

    /// Normalized attack, 0..1 → 1 ms..1 s.
    pub fn set_attack(&mut self, value: f32) {
        self.attack_time = ATTACK_MIN * (ATTACK_MAX / ATTACK_MIN).powf(value.clamp(0.0, 1.0));
        self.update_coefficients();
    }

    /// Normalized release, 0..1 → 10 ms..5 s.
    pub fn set_release(&mut self, value: f32) {
        self.release_time = RELEASE_MIN * (RELEASE_MAX / RELEASE_MIN).powf(value.clamp(0.0, 1.0));
        self.update_coefficients();
    }

    fn update_coefficients(&mut self) {
        self.attack_coeff = pole_coefficient(self.attack_time, self.sample_rate);
        self.release_coeff = pole_coefficient(self.release_time, self.sample_rate);
    }

    pub fn set_gate(&mut self, gate: bool) {
        self.gate = gate;
        self.stage = if gate {
            EnvelopeStage::Attack
        } else {
            EnvelopeStage::Release
        };
    }

    /// Advance one sample and return the new level.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        match self.stage {
            EnvelopeStage::Attack => {
                self.level += (1.0 - self.level) * (1.0 - self.attack_coeff);
            }
            EnvelopeStage::Release => {
                self.level *= self.release_coeff;
            }
        }
        self.level
    }

    /// False once a released envelope has decayed into silence.
    pub fn is_playing(&self) -> bool {
        self.gate || self.level >= SILENCE_THRESHOLD
    }

    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn stage(&self) -> EnvelopeStage {
        self.stage
    }

    pub fn gate(&self) -> bool {
        self.gate
    }

    /// Attack time constant in seconds.
    pub fn attack_time(&self) -> f32 {
        self.attack_time
    }

    /// Release time constant in seconds.
    pub fn release_time(&self) -> f32 {
        self.release_time
    }

    /// Silence the envelope and drop the gate.
    pub fn reset(&mut self) {
        self.level = 0.0;
        self.gate = false;
        self.stage = EnvelopeStage::Release;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44_100.0;

    #[test]
    fn fastest_attack_reaches_full_level_within_five_taus() {
        let mut env = Envelope::new(SAMPLE_RATE);
        env.set_attack(0.0);
        env.set_gate(true);

        let tau_samples = env.attack_time() * SAMPLE_RATE;
        let budget = (5.0 * tau_samples).ceil() as usize;
        for _ in 0..budget {
            env.next_sample();
        }
        assert!(env.level() >= 0.99, "attack only reached {}", env.level());
    }

    #[test]
    fn slowest_release_matches_log_decay_time() {
        let mut env = Envelope::new(SAMPLE_RATE);
        env.set_attack(0.0);
        env.set_release(1.0);
        env.set_gate(true);
        for _ in 0..2_000 {
            env.next_sample();
        }
        let start = env.level();
        env.set_gate(false);

        let tau_samples = env.release_time() * SAMPLE_RATE;
        let expected = ((1e4f32 * start).ln() * tau_samples) as usize;

        let mut samples = 0usize;
        while env.level() >= 1e-4 {
            env.next_sample();
            samples += 1;
            assert!(samples < expected * 2, "release never fell below 1e-4");
        }

        let error = (samples as f32 - expected as f32).abs() / expected as f32;
        assert!(error < 0.1, "release took {} samples, expected ~{}", samples, expected);
    }

    #[test]
    fn release_starts_from_current_level() {
        let mut env = Envelope::new(SAMPLE_RATE);
        env.set_attack(0.5);
        env.set_gate(true);
        for _ in 0..100 {
            env.next_sample();
        }
        let mid = env.level();
        env.set_gate(false);
        let next = env.next_sample();
        assert!(next < mid && next > mid * 0.9);
    }

    #[test]
    fn reports_finished_after_release() {
        let mut env = Envelope::new(SAMPLE_RATE);
        env.set_attack(0.0);
        env.set_release(0.0);
        env.set_gate(true);
        for _ in 0..500 {
            env.next_sample();
        }
        assert!(env.is_playing());
        env.set_gate(false);
        for _ in 0..(SAMPLE_RATE as usize / 2) {
            env.next_sample();
        }
        assert!(!env.is_playing());
    }

    #[test]
    fn mappings_hit_bounds() {
        let mut env = Envelope::new(SAMPLE_RATE);
        env.set_attack(0.0);
        env.set_release(1.0);
        assert!((env.attack_time() - 0.001).abs() < 1e-6);
        assert!((env.release_time() - 5.0).abs() < 1e-3);
        env.set_attack(2.0);
        assert!((env.attack_time() - 1.0).abs() < 1e-4);
    }
}
