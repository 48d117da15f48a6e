//! Per-module random source.
//!
//! Each module that needs noise owns one of these. Nothing is shared between
//! voices, so a voice rendered twice from the same seed produces identical audio.

use rand::{rngs::SmallRng, Rng, SeedableRng};

#[derive(Debug, Clone)]
pub struct Random {
    rng: SmallRng,
    spare_normal: Option<f32>,
}

impl Random {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            spare_normal: None,
        }
    }

    /// Restart the sequence from `seed`.
    pub fn reseed(&mut self, seed: u64) {
        self.rng = SmallRng::seed_from_u64(seed);
        self.spare_normal = None;
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn uniform(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    /// Uniform in `[-1, 1)`.
    #[inline]
    pub fn uniform_signed(&mut self) -> f32 {
        self.uniform() * 2.0 - 1.0
    }

    /// Uniform signed noise scaled by `amplitude`.
    #[inline]
    pub fn white(&mut self, amplitude: f32) -> f32 {
        self.uniform_signed() * amplitude
    }

    /// Gaussian variate via Box-Muller, caching the second value of each pair.
    pub fn normal(&mut self, mean: f32, std_dev: f32) -> f32 {
        if let Some(z) = self.spare_normal.take() {
            return mean + z * std_dev;
        }
        // u1 in (0, 1] keeps ln() finite
        let u1 = 1.0 - self.uniform();
        let u2 = self.uniform();
        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = std::f32::consts::TAU * u2;
        self.spare_normal = Some(radius * angle.sin());
        mean + radius * angle.cos() * std_dev
    }
}

/// Derive a stream seed for a sub-module from a parent seed.
///
/// SplitMix64 finalizer, so neighbouring indices land far apart.
pub fn derive_seed(seed: u64, stream: u64) -> u64 {
    let mut z = seed.wrapping_add(stream.wrapping_mul(0x9E37_79B9_7F4A_7C15));
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
