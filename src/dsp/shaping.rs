//! Nonlinear shaping functions.
//!
//! Every interface strategy is built out of a handful of transfer curves. They
//! are all stateless `#[inline]` functions so they can be called per sample
//! from anywhere in the voice without touching the heap.

use std::f32::consts::FRAC_PI_2;

/// Rational tanh approximation, exact ±1 beyond |x| > 3.
#[inline]
pub fn fast_tanh(x: f32) -> f32 {
    if x > 3.0 {
        return 1.0;
    }
    if x < -3.0 {
        return -1.0;
    }
    let x2 = x * x;
    x * (27.0 + x2) / (27.0 + 9.0 * x2)
}

/// Drive into [`fast_tanh`].
#[inline]
pub fn soft_clip(x: f32, drive: f32) -> f32 {
    fast_tanh(x * drive)
}

#[inline]
pub fn hard_clip(x: f32, threshold: f32) -> f32 {
    x.clamp(-threshold, threshold)
}

/// `x - alpha * x^3`. Small alphas add gentle odd harmonics.
#[inline]
pub fn cubic_waveshaper(x: f32, alpha: f32) -> f32 {
    x - alpha * x * x * x
}

/// Wavefolder: `sin(x * drive * pi / 2)`.
#[inline]
pub fn sine_fold(x: f32, drive: f32) -> f32 {
    (x * drive * FRAC_PI_2).sin()
}

/// Cubic soft saturation used by the legacy output stage: linear-ish near zero,
/// flat at ±1 outside the unit interval.
#[inline]
pub fn cubic_soft_clip(x: f32) -> f32 {
    if x > 1.0 {
        1.0
    } else if x < -1.0 {
        -1.0
    } else {
        1.5 * x - 0.5 * x * x * x
    }
}

/// `sign(x) * |x|^exponent`
#[inline]
pub fn signed_pow(x: f32, exponent: f32) -> f32 {
    x.signum() * x.abs().powf(exponent)
}

/// Replace NaN and infinities with silence.
#[inline]
pub fn sanitize(x: f32) -> f32 {
    if x.is_finite() {
        x
    } else {
        0.0
    }
}

/// Exponential map of a normalized control onto `[min, max]`.
#[inline]
pub fn exp_map(value: f32, min: f32, max: f32) -> f32 {
    min * (max / min).powf(value.clamp(0.0, 1.0))
}
