//! Logistic-map oscillator.
//!
//! `x <- r * x * (1 - x)`. Below r ≈ 3.57 the map settles into a fixed point or
//! a short cycle; above it the sequence turns chaotic, which reads as a
//! pitched-noise texture when run at audio rate.

const R_MIN: f32 = 2.5;
const R_MAX: f32 = 4.0;
const X_START: f32 = 0.5;

#[derive(Debug, Clone, Copy)]
pub struct ChaoticOscillator {
    r: f32,
    x: f32,
}

impl ChaoticOscillator {
    pub fn new(r: f32) -> Self {
        Self {
            r: r.clamp(R_MIN, R_MAX),
            x: X_START,
        }
    }

    pub fn set_r(&mut self, r: f32) {
        self.r = r.clamp(R_MIN, R_MAX);
    }

    /// Advance the map once and return a bipolar sample scaled by `amplitude`.
    #[inline]
    pub fn next_sample(&mut self, amplitude: f32) -> f32 {
        self.x = self.r * self.x * (1.0 - self.x);
        (self.x * 2.0 - 1.0) * amplitude
    }

    pub fn reset(&mut self) {
        self.x = X_START;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stays_bounded_across_r() {
        for step in 0..=15 {
            let mut osc = ChaoticOscillator::new(2.5 + step as f32 * 0.1);
            for _ in 0..10_000 {
                let v = osc.next_sample(1.0);
                assert!(v.is_finite() && (-1.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn r_is_clamped() {
        let mut osc = ChaoticOscillator::new(10.0);
        for _ in 0..1_000 {
            assert!(osc.next_sample(1.0).abs() <= 1.0);
        }
    }

    #[test]
    fn reset_restarts_sequence() {
        let mut osc = ChaoticOscillator::new(3.9);
        let first: Vec<f32> = (0..8).map(|_| osc.next_sample(1.0)).collect();
        osc.reset();
        let again: Vec<f32> = (0..8).map(|_| osc.next_sample(1.0)).collect();
        assert_eq!(first, again);
    }
}
