//! Low Frequency Oscillator driving amplitude and frequency modulation.

/*
Modulation
==========

One free-running sine LFO feeds two multiplicative factors. A single
"type/level" control picks which one moves:

    type/level   0.0 ─────────── 0.5 ─────────── 1.0
                 full AM         off             full FM

Vocabulary
----------

  lfo         Bipolar sine, -1.0 to +1.0. Phase is kept in radians and wraps
              at 2π. The phase is NOT reset by notes; it only restarts when
              the module is reset.

  am factor   Multiplies the voice output. Swings between 1 - depth and 1.0,
              so full AM depth pulses the level all the way down to silence
              and never boosts it:

                  am = 1 - depth/2 + lfo * depth/2

  fm factor   Multiplies a frequency (or, for the legacy wiring, the output).
              Kept to ±10% at full depth:

                  fm = 1 + lfo * depth * 0.1

Frequency Mapping
-----------------

    lfo_hz = 0.1 * 200^x        (0.1 Hz .. 20 Hz)

Typical zones: 0.1-0.5 Hz slow sweeps, 2-7 Hz vibrato/tremolo, 15 Hz and up
starts to sound like audio-rate sidebands.
*/

use std::f32::consts::TAU;

use super::shaping::exp_map;

const LFO_MIN_HZ: f32 = 0.1;
const LFO_MAX_HZ: f32 = 20.0;
const FM_RANGE: f32 = 0.1;

/// Per-sample modulation output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModulationState {
    pub lfo: f32,
    pub am: f32,
    pub fm: f32,
}

impl ModulationState {
    /// Factors that leave everything untouched.
    pub const NEUTRAL: ModulationState = ModulationState {
        lfo: 0.0,
        am: 1.0,
        fm: 1.0,
    };
}

pub struct Modulation {
    sample_rate: f32,
    frequency_hz: f32,
    phase: f32,
    type_level: f32,
    am_depth: f32,
    fm_depth: f32,
}

impl Modulation {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            sample_rate,
            frequency_hz: 5.0,
            phase: 0.0,
            type_level: 0.5,
            am_depth: 0.0,
            fm_depth: 0.0,
        }
    }

    /// Normalized rate, 0..1 → 0.1..20 Hz.
    pub fn set_frequency(&mut self, value: f32) {
        self.frequency_hz = exp_map(value, LFO_MIN_HZ, LFO_MAX_HZ);
    }

    /// Below 0.5 selects AM, above selects FM, depth grows away from the midpoint.
    pub fn set_type_level(&mut self, value: f32) {
        self.type_level = value.clamp(0.0, 1.0);
        if self.type_level < 0.5 {
            self.am_depth = (0.5 - self.type_level) * 2.0;
            self.fm_depth = 0.0;
        } else {
            self.am_depth = 0.0;
            self.fm_depth = (self.type_level - 0.5) * 2.0;
        }
    }

    pub fn frequency_hz(&self) -> f32 {
        self.frequency_hz
    }

    pub fn am_depth(&self) -> f32 {
        self.am_depth
    }

    pub fn fm_depth(&self) -> f32 {
        self.fm_depth
    }

    #[inline]
    pub fn next_state(&mut self) -> ModulationState {
        self.phase += TAU * self.frequency_hz / self.sample_rate;
        if self.phase > TAU {
            self.phase -= TAU;
        }
        let lfo = self.phase.sin();
        ModulationState {
            lfo,
            am: 1.0 - self.am_depth * 0.5 + lfo * self.am_depth * 0.5,
            fm: 1.0 + lfo * self.fm_depth * FM_RANGE,
        }
    }

    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}
