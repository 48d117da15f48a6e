//! Offline measurements over rendered buffers.
//!
//! Nothing here is meant for the audio thread: `dominant_frequency` plans an
//! FFT and allocates on every call.

use rustfft::{num_complex::Complex, Fft, FftPlanner};

pub fn rms(buffer: &[f32]) -> f32 {
    if buffer.is_empty() {
        return 0.0;
    }
    let sum: f64 = buffer.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum / buffer.len() as f64).sqrt() as f32
}

pub fn peak(buffer: &[f32]) -> f32 {
    buffer.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()))
}

pub fn mean(buffer: &[f32]) -> f32 {
    if buffer.is_empty() {
        return 0.0;
    }
    let sum: f64 = buffer.iter().map(|&s| s as f64).sum();
    (sum / buffer.len() as f64) as f32
}

pub fn peak_to_peak(buffer: &[f32]) -> f32 {
    let (lo, hi) = buffer
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), &s| (lo.min(s), hi.max(s)));
    if buffer.is_empty() {
        0.0
    } else {
        hi - lo
    }
}

/// Peak over RMS. Zero for silence.
pub fn crest_factor(buffer: &[f32]) -> f32 {
    let rms = rms(buffer);
    if rms > 0.0 {
        peak(buffer) / rms
    } else {
        0.0
    }
}

/// Count of negative-to-non-negative transitions.
pub fn zero_crossings(buffer: &[f32]) -> usize {
    buffer
        .windows(2)
        .filter(|pair| pair[0] < 0.0 && pair[1] >= 0.0)
        .count()
}

/// Fundamental estimate from the rising zero-crossing rate.
pub fn zero_crossing_frequency(buffer: &[f32], sample_rate: f32) -> f32 {
    if buffer.len() < 2 {
        return 0.0;
    }
    let seconds = buffer.len() as f32 / sample_rate;
    zero_crossings(buffer) as f32 / seconds
}

/// Frequency of the strongest FFT bin above DC, after a Hann window. The buffer
/// is zero padded to the next power of two.
pub fn dominant_frequency(buffer: &[f32], sample_rate: f32) -> f32 {
    if buffer.len() < 2 {
        return 0.0;
    }
    let size = buffer.len().next_power_of_two();
    let denom = (buffer.len() - 1) as f32;

    let mut bins: Vec<Complex<f32>> = buffer
        .iter()
        .enumerate()
        .map(|(i, &s)| {
            let w = 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos());
            Complex::new(s * w, 0.0)
        })
        .collect();
    bins.resize(size, Complex::new(0.0, 0.0));

    let mut planner = FftPlanner::new();
    let fft: std::sync::Arc<dyn Fft<f32>> = planner.plan_fft_forward(size);
    fft.process(&mut bins);

    let best = bins[1..size / 2]
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.norm_sqr().total_cmp(&b.norm_sqr()))
        .map(|(i, _)| i + 1)
        .unwrap_or(0);
    best as f32 * sample_rate / size as f32
}
