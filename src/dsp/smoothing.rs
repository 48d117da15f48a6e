//! One-pole smoothers and the feedback-path DC blocker.

/// Exponential one-pole lowpass, `y += (x - y) * (1 - a)`.
#[derive(Debug, Clone, Copy)]
pub struct OnePole {
    coefficient: f32,
    value: f32,
}

impl OnePole {
    /// `time_constant` is in seconds. Zero or negative times pass input straight through.
    pub fn new(time_constant: f32, sample_rate: f32) -> Self {
        let mut pole = Self {
            coefficient: 0.0,
            value: 0.0,
        };
        pole.set_time(time_constant, sample_rate);
        pole
    }

    pub fn set_time(&mut self, time_constant: f32, sample_rate: f32) {
        self.coefficient = pole_coefficient(time_constant, sample_rate);
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32) -> f32 {
        self.value = self.value * self.coefficient + input * (1.0 - self.coefficient);
        self.value
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn reset(&mut self, value: f32) {
        self.value = value;
    }
}

/// `exp(-1 / (time * sample_rate))`, or 0 for a non-positive time.
#[inline]
pub fn pole_coefficient(time_constant: f32, sample_rate: f32) -> f32 {
    let samples = time_constant * sample_rate;
    if samples <= 0.0 || !samples.is_finite() {
        0.0
    } else {
        (-1.0 / samples).exp()
    }
}

/// Pole radius of the DC blocker. The corner sits around 35 Hz at 44.1 kHz.
pub const DC_BLOCKER_POLE: f32 = 0.995;

/// `y[n] = x[n] - x[n-1] + R * y[n-1]`
#[derive(Debug, Clone, Copy, Default)]
pub struct DcBlocker {
    x1: f32,
    y1: f32,
}

impl DcBlocker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32) -> f32 {
        let y = input - self.x1 + DC_BLOCKER_POLE * self.y1;
        self.x1 = input;
        self.y1 = y;
        y
    }

    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.y1 = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dc_blocker_removes_constant_offset() {
        let mut blocker = DcBlocker::new();
        let mut last = 1.0;
        for _ in 0..44_100 {
            last = blocker.next_sample(0.8);
        }
        assert!(last.abs() < 1e-6, "DC leaked through blocker: {}", last);
    }

    #[test]
    fn dc_blocker_passes_audio_rate_content() {
        let mut blocker = DcBlocker::new();
        let sample_rate = 44_100.0;
        let mut peak = 0.0f32;
        for n in 0..4_410 {
            let x = (std::f32::consts::TAU * 1_000.0 * n as f32 / sample_rate).sin();
            let y = blocker.next_sample(x + 0.5);
            if n > 2_000 {
                peak = peak.max(y.abs());
            }
        }
        assert!(peak > 0.95 && peak < 1.05, "1 kHz should pass, peak = {}", peak);
    }

    #[test]
    fn one_pole_converges_with_time_constant() {
        let sample_rate = 1_000.0;
        let mut pole = OnePole::new(0.01, sample_rate);
        for _ in 0..10 {
            pole.next_sample(1.0);
        }
        // one time constant
        assert!((pole.value() - (1.0 - (-1.0f32).exp())).abs() < 1e-3);
    }

    #[test]
    fn zero_time_is_instantaneous() {
        let mut pole = OnePole::new(0.0, 48_000.0);
        assert_eq!(pole.next_sample(0.7), 0.7);
    }
}
