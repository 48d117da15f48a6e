//! Feedback mixer closing the loop from the resonant body back to the interface.
//!
//! ```text
//! out = d1 * g1 + d2 * g2 + filter * g3        g = clamp(control, 0, 1) * 0.99
//! ```
//!
//! The mixer only weighs the taps. DC removal happens in the voice, on the
//! mixer's output, so the forward excitation path keeps its DC.

/// Largest gain any tap can reach.
pub const MAX_FEEDBACK: f32 = 0.99;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeedbackMixer {
    delay1_gain: f32,
    delay2_gain: f32,
    filter_gain: f32,
}

impl Default for FeedbackMixer {
    fn default() -> Self {
        Self::new()
    }
}

fn scaled(value: f32) -> f32 {
    value.clamp(0.0, 1.0) * MAX_FEEDBACK
}

impl FeedbackMixer {
    pub fn new() -> Self {
        Self {
            delay1_gain: scaled(0.95),
            delay2_gain: scaled(0.95),
            filter_gain: 0.0,
        }
    }

    pub fn set_delay1(&mut self, value: f32) {
        self.delay1_gain = scaled(value);
    }

    pub fn set_delay2(&mut self, value: f32) {
        self.delay2_gain = scaled(value);
    }

    pub fn set_filter(&mut self, value: f32) {
        self.filter_gain = scaled(value);
    }

    /// Effective gains `(delay1, delay2, filter)` after scaling.
    pub fn gains(&self) -> (f32, f32, f32) {
        (self.delay1_gain, self.delay2_gain, self.filter_gain)
    }

    #[inline]
    pub fn process(&self, delay1: f32, delay2: f32, filter: f32) -> f32 {
        delay1 * self.delay1_gain + delay2 * self.delay2_gain + filter * self.filter_gain
    }
}
