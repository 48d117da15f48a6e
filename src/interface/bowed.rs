//! Bowed string: stick-slip friction.
//!
//! The bow keeps a slowly following "stick" state. The slip velocity is the
//! distance between the incoming string motion and that state; friction is a
//! steep tanh of the slip. A little grit noise rides on top.

use super::{Drive, Strategy};
use crate::dsp::shaping::fast_tanh;

#[derive(Debug, Clone, Default)]
pub struct Bow {
    state: f32,
}

impl Strategy for Bow {
    fn process(&mut self, input: f32, drive: &mut Drive<'_>) -> f32 {
        let i = drive.intensity;
        let velocity = i * 0.9 + 0.2;
        let slip = input - self.state;
        let friction = fast_tanh(slip * (6.0 + i * 12.0));
        let grit = drive.rng.white(i * 0.012);
        let output = friction * (0.55 + i * 0.35) + slip * 0.25 + grit;

        let stick = 0.8 - i * 0.25;
        self.state = self.state * stick + (input + friction * velocity * 0.05) * (1.0 - stick);
        output.clamp(-1.0, 1.0)
    }

    fn reset(&mut self) {
        self.state = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::random::Random;

    #[test]
    fn state_follows_constant_pressure() {
        let mut rng = Random::new(4);
        let mut drive = Drive {
            intensity: 0.0,
            gate: true,
            rng: &mut rng,
        };
        let mut bow = Bow::default();
        let first = bow.process(0.4, &mut drive);
        for _ in 0..500 {
            bow.process(0.4, &mut drive);
        }
        let settled = bow.process(0.4, &mut drive);
        // once the bow sticks, slip and friction collapse
        assert!(settled.abs() < first.abs());
        assert!((bow.state - 0.4).abs() < 0.05);
    }
}
