//! Signal level followers used by the dynamic interface strategies.

use super::smoothing::pole_coefficient;

/// Smoothed `|x|`. A zero smoothing time makes it follow the instantaneous magnitude.
#[derive(Debug, Clone, Copy)]
pub struct AmplitudeTracker {
    coefficient: f32,
    amplitude: f32,
}

impl AmplitudeTracker {
    pub fn new(smoothing_time: f32, sample_rate: f32) -> Self {
        Self {
            coefficient: pole_coefficient(smoothing_time, sample_rate),
            amplitude: 0.0,
        }
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32) -> f32 {
        let instant = input.abs();
        self.amplitude = if self.coefficient == 0.0 {
            instant
        } else {
            self.amplitude * self.coefficient + instant * (1.0 - self.coefficient)
        };
        self.amplitude
    }

    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    pub fn reset(&mut self) {
        self.amplitude = 0.0;
    }
}

/// Leaky sum of `|x|`: `e <- e * decay + |x|`.
#[derive(Debug, Clone, Copy)]
pub struct EnergyAccumulator {
    decay: f32,
    energy: f32,
}

impl EnergyAccumulator {
    pub fn new(decay: f32) -> Self {
        Self {
            decay: decay.clamp(0.0, 1.0),
            energy: 0.0,
        }
    }

    pub fn set_decay(&mut self, decay: f32) {
        self.decay = decay.clamp(0.0, 1.0);
    }

    /// Accumulate `|input| * weight`.
    #[inline]
    pub fn next_sample(&mut self, input: f32, weight: f32) -> f32 {
        self.energy = self.energy * self.decay + input.abs() * weight;
        self.energy
    }

    pub fn energy(&self) -> f32 {
        self.energy
    }

    pub fn reset(&mut self) {
        self.energy = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instantaneous_tracker_follows_magnitude() {
        let mut tracker = AmplitudeTracker::new(0.0, 44_100.0);
        assert_eq!(tracker.next_sample(-0.4), 0.4);
        assert_eq!(tracker.next_sample(0.1), 0.1);
    }

    #[test]
    fn smoothed_tracker_rises_gradually() {
        let mut tracker = AmplitudeTracker::new(0.001, 44_100.0);
        let first = tracker.next_sample(1.0);
        assert!(first > 0.0 && first < 0.1);
        for _ in 0..441 {
            tracker.next_sample(1.0);
        }
        assert!(tracker.amplitude() > 0.99);
    }

    #[test]
    fn energy_settles_at_geometric_limit() {
        let mut acc = EnergyAccumulator::new(0.5);
        for _ in 0..100 {
            acc.next_sample(-1.0, 1.0);
        }
        assert!((acc.energy() - 2.0).abs() < 1e-4);
    }
}
