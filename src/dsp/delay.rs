//! Circular delay line with fractional read positions.
//!
//! The buffer is allocated once in [`FractionalDelayLine::new`]; reads and
//! writes after that never touch the heap. A read at length `L` returns the
//! sample written `L` writes ago, interpolated between the two (linear) or
//! four (Hermite) neighbouring taps.

pub struct FractionalDelayLine {
    buffer: Vec<f32>,
    write_pos: usize,
}

impl FractionalDelayLine {
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: vec![0.0; capacity.max(4)],
            write_pos: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Store `sample` at the write head and advance it.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        self.buffer[self.write_pos] = sample;
        self.write_pos = (self.write_pos + 1) % self.buffer.len();
    }

    /// Integer tap index and fractional part for a read `delay` samples behind the write head.
    #[inline]
    fn read_position(&self, delay: f32) -> (usize, f32) {
        let len = self.buffer.len() as f32;
        let pos = (self.write_pos as f32 - delay).rem_euclid(len);
        let index = pos.floor();
        // rem_euclid can round up to exactly `len` for tiny negative inputs
        let index_usize = (index as usize) % self.buffer.len();
        (index_usize, pos - index)
    }

    #[inline]
    pub fn read_linear(&self, delay: f32) -> f32 {
        let (i0, frac) = self.read_position(delay);
        let i1 = (i0 + 1) % self.buffer.len();
        self.buffer[i0] * (1.0 - frac) + self.buffer[i1] * frac
    }

    /// Four-point, third-order Hermite read.
    #[inline]
    pub fn read_hermite(&self, delay: f32) -> f32 {
        let len = self.buffer.len();
        let (i0, frac) = self.read_position(delay);
        let xm1 = self.buffer[(i0 + len - 1) % len];
        let x0 = self.buffer[i0];
        let x1 = self.buffer[(i0 + 1) % len];
        let x2 = self.buffer[(i0 + 2) % len];

        let c0 = x0;
        let c1 = 0.5 * (x1 - xm1);
        let c2 = xm1 - 2.5 * x0 + 2.0 * x1 - 0.5 * x2;
        let c3 = 0.5 * (x2 - xm1) + 1.5 * (x0 - x1);
        ((c3 * frac + c2) * frac + c1) * frac + c0
    }

    /// Store `sample` as if it had been written `age` writes ago, so that
    /// `read_linear(age)` returns it. `age` is taken modulo the capacity.
    pub fn seed_history(&mut self, age: usize, sample: f32) {
        let len = self.buffer.len();
        let index = (self.write_pos + len - age % len) % len;
        self.buffer[index] = sample;
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_delay_reads_back_exact_sample() {
        let mut line = FractionalDelayLine::new(64);
        for i in 0..40 {
            line.write(i as f32);
        }
        // last write was 39; 10 writes ago was 30
        assert_eq!(line.read_linear(10.0), 30.0);
        assert_eq!(line.read_hermite(10.0), 30.0);
    }

    #[test]
    fn fractional_delay_interpolates() {
        let mut line = FractionalDelayLine::new(64);
        for i in 0..40 {
            line.write(i as f32);
        }
        let v = line.read_linear(10.5);
        assert!((v - 29.5).abs() < 1e-5, "got {}", v);
        let h = line.read_hermite(10.5);
        assert!((h - 29.5).abs() < 1e-4, "hermite on a ramp should be exact, got {}", h);
    }

    #[test]
    fn wraps_around_capacity() {
        let mut line = FractionalDelayLine::new(16);
        for i in 0..100 {
            line.write(i as f32);
        }
        assert_eq!(line.read_linear(5.0), 95.0);
    }

    #[test]
    fn seeded_history_reads_back() {
        let mut line = FractionalDelayLine::new(32);
        line.write(0.0);
        line.seed_history(7, 0.25);
        assert_eq!(line.read_linear(7.0), 0.25);
    }

    #[test]
    fn reset_clears_buffer() {
        let mut line = FractionalDelayLine::new(16);
        for _ in 0..16 {
            line.write(1.0);
        }
        line.reset();
        assert_eq!(line.read_linear(3.0), 0.0);
    }
}
