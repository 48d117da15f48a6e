use std::f32::consts::PI;

use super::shaping::exp_map;

/*
| shape | output                          |
| ----- | ------------------------------- |
| 0.0   | low-pass                        |
| 0.25  | half low-pass, half band-pass   |
| 0.5   | band-pass                       |
| 0.75  | half band-pass, half high-pass  |
| 1.0   | high-pass                       |

Chamberlin state-variable filter, one update per sample:

    low  += f * band
    high  = in - low - q_inv * band
    band += f * high

f = 2 sin(pi * fc / fs) and q_inv is floored at 0.01. The update is stable
only while f^2 + 2 f q_inv < 4, so f is capped at 1 and, for heavily damped
settings, just inside sqrt(q_inv^2 + 4) - q_inv. Any non-finite state left
over from the feedback loop is dropped back to zero on the spot.
*/

const FREQ_MIN: f32 = 20.0;
const FREQ_MAX: f32 = 20_000.0;
const Q_MIN: f32 = 0.5;
const Q_MAX: f32 = 20.0;
const Q_INV_FLOOR: f32 = 0.01;
const STABILITY_MARGIN: f32 = 0.98;

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
}

pub struct MorphFilter {
    sample_rate: f32,
    pub cutoff_hz: f32,
    pub q: f32,
    shape: f32,

    low: f32,
    band: f32,
    high: f32,
}

impl MorphFilter {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            cutoff_hz: 1_000.0,
            q: 1.0,
            shape: 0.0,
            low: 0.0,
            band: 0.0,
            high: 0.0,
        }
    }

    /// Normalized cutoff, 0..1 → 20 Hz..20 kHz.
    pub fn set_frequency(&mut self, value: f32) {
        self.cutoff_hz = exp_map(value, FREQ_MIN, FREQ_MAX);
    }

    /// Normalized resonance, 0..1 → Q 0.5..20.
    pub fn set_q(&mut self, value: f32) {
        self.q = exp_map(value, Q_MIN, Q_MAX);
    }

    /// Response morph, 0 = LP, 0.5 = BP, 1 = HP.
    pub fn set_shape(&mut self, value: f32) {
        self.shape = value.clamp(0.0, 1.0);
    }

    #[inline]
    fn coefficients(&self) -> (f32, f32) {
        let q_inv = (1.0 / self.q.max(Q_MIN)).max(Q_INV_FLOOR);
        let f_max = ((q_inv * q_inv + 4.0).sqrt() - q_inv) * STABILITY_MARGIN;
        let f = (2.0 * (PI * self.cutoff_hz / self.sample_rate).sin()).min(f_max.min(1.0));
        (f, q_inv)
    }

    pub fn next_outputs(&mut self, input: f32) -> FilterOutputs {
        let (f, q_inv) = self.coefficients();

        self.low += f * self.band;
        self.high = input - self.low - q_inv * self.band;
        self.band += f * self.high;

        if !self.low.is_finite() {
            self.low = 0.0;
        }
        if !self.band.is_finite() {
            self.band = 0.0;
        }
        if !self.high.is_finite() {
            self.high = 0.0;
        }

        FilterOutputs {
            lowpass: self.low,
            bandpass: self.band,
            highpass: self.high,
        }
    }

    #[inline]
    pub fn next_sample(&mut self, input: f32) -> f32 {
        let out = self.next_outputs(input);
        if self.shape < 0.5 {
            let mix = self.shape * 2.0;
            out.lowpass * (1.0 - mix) + out.bandpass * mix
        } else {
            let mix = (self.shape - 0.5) * 2.0;
            out.bandpass * (1.0 - mix) + out.highpass * mix
        }
    }

    pub fn render(&mut self, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.next_sample(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.low = 0.0;
        self.band = 0.0;
        self.high = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 44_100.0;

    fn sine(freq: f32, samples: usize) -> Vec<f32> {
        (0..samples)
            .map(|n| (2.0 * PI * freq * n as f32 / SAMPLE_RATE).sin())
            .collect()
    }

    fn steady_peak(filter: &mut MorphFilter, input: &[f32]) -> f32 {
        let mut buffer = input.to_vec();
        filter.render(&mut buffer);
        buffer[buffer.len() / 2..]
            .iter()
            .fold(0.0f32, |acc, &x| acc.max(x.abs()))
    }

    #[test]
    fn lowpass_attenuates_high_frequencies() {
        let mut filter = MorphFilter::new(SAMPLE_RATE);
        filter.set_frequency(0.4); // ~320 Hz
        filter.set_q(0.0);
        filter.set_shape(0.0);

        let low = steady_peak(&mut filter, &sine(60.0, 8_192));
        filter.reset();
        let high = steady_peak(&mut filter, &sine(8_000.0, 8_192));

        assert!(low > 0.8, "low tone should pass, got {}", low);
        assert!(high < 0.05, "high tone should be cut, got {}", high);
    }

    #[test]
    fn highpass_blocks_dc() {
        let mut filter = MorphFilter::new(SAMPLE_RATE);
        filter.set_frequency(0.5);
        filter.set_shape(1.0);
        let mut out = 1.0;
        for _ in 0..20_000 {
            out = filter.next_sample(1.0);
        }
        assert!(out.abs() < 1e-3, "high-pass let DC through: {}", out);
    }

    #[test]
    fn bandpass_peaks_at_cutoff() {
        let mut filter = MorphFilter::new(SAMPLE_RATE);
        filter.set_frequency(0.5); // ~632 Hz
        filter.set_q(0.5);
        filter.set_shape(0.5);
        let centre = filter.cutoff_hz;

        let at_centre = steady_peak(&mut filter, &sine(centre, 8_192));
        filter.reset();
        let far_below = steady_peak(&mut filter, &sine(centre / 16.0, 8_192));
        assert!(at_centre > far_below * 4.0);
    }

    #[test]
    fn survives_extreme_settings() {
        let mut filter = MorphFilter::new(SAMPLE_RATE);
        filter.set_frequency(1.0);
        filter.set_q(1.0);
        for n in 0..44_100 {
            let x = if n % 2 == 0 { 1.0 } else { -1.0 };
            let y = filter.next_sample(x);
            assert!(y.is_finite());
        }
    }

    #[test]
    fn heavily_damped_full_cutoff_stays_bounded() {
        let mut filter = MorphFilter::new(SAMPLE_RATE);
        filter.set_frequency(1.0);
        filter.set_q(0.0);
        filter.set_shape(0.5);
        let (f, q_inv) = filter.coefficients();
        assert!(f * f + 2.0 * f * q_inv < 4.0);

        let mut peak = 0.0f32;
        for n in 0..44_100 {
            let x = if n % 2 == 0 { 1.0 } else { -1.0 };
            peak = peak.max(filter.next_sample(x).abs());
        }
        assert!(peak < 100.0, "diverged to {}", peak);
    }

    #[test]
    fn non_finite_input_is_contained() {
        let mut filter = MorphFilter::new(SAMPLE_RATE);
        filter.next_sample(f32::NAN);
        let y = filter.next_sample(0.0);
        assert!(y.is_finite());
    }
}
