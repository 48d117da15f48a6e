//! Single-voice engine with its own reverb.
//!
//! The reverb sits directly after the one voice instead of on a shared bus.
//! [`MonoSynth::legacy`] reproduces the older single-voice wiring, where the
//! LFO's FM factor scales the output rather than the source pitch.

use log::debug;

use crate::dsp::{
    shaping::{hard_clip, sanitize},
    SchroederReverb,
};
use crate::synth::{
    config::{EngineConfig, FmRouting},
    params::{ParamId, Params},
    voice::Voice,
};

const LEGACY_DEFAULTS: [(ParamId, f32); 9] = [
    (ParamId::DcLevel, 0.0),
    (ParamId::NoiseLevel, 0.1),
    (ParamId::ToneLevel, 0.0),
    (ParamId::Delay1Feedback, 0.0),
    (ParamId::Delay2Feedback, 0.0),
    (ParamId::FilterFrequency, 0.7),
    (ParamId::FilterQ, 0.2),
    (ParamId::LfoFrequency, 0.3),
    (ParamId::ModulationTypeLevel, 0.5),
];

pub struct MonoSynth {
    params: Params,
    voice: Voice,
    reverb: SchroederReverb,
    age: u64,
}

impl MonoSynth {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_config(EngineConfig::with_sample_rate(sample_rate))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let params = Params::new();
        let mut reverb = SchroederReverb::new(config.sample_rate);
        reverb.set_size(params.get(ParamId::ReverbSize));
        reverb.set_level(params.get(ParamId::ReverbLevel));
        debug!(
            "mono synth at {} Hz, fm {:?}",
            config.sample_rate, config.fm_routing
        );
        Self {
            params,
            voice: Voice::new(config.sample_rate, config.seed, config.fm_routing),
            reverb,
            age: 0,
        }
    }

    /// Output-scaled FM and the quieter single-voice defaults.
    pub fn legacy(sample_rate: f32) -> Self {
        let config = EngineConfig::with_sample_rate(sample_rate).fm_routing(FmRouting::OutputScale);
        let mut synth = Self::with_config(config);
        for (id, value) in LEGACY_DEFAULTS {
            synth.set_param(id, value);
        }
        synth
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn voice(&self) -> &Voice {
        &self.voice
    }

    pub fn set_param(&mut self, id: ParamId, value: f32) -> bool {
        let changed = self.params.set(id, value);
        if changed {
            match id {
                ParamId::ReverbSize => self.reverb.set_size(self.params.get(id)),
                ParamId::ReverbLevel => self.reverb.set_level(self.params.get(id)),
                _ => {}
            }
        }
        changed
    }

    pub fn set_param_percent(&mut self, id: ParamId, percent: f32) -> bool {
        self.set_param(id, id.from_percent(percent))
    }

    all_param_setters!();

    pub fn note_on(&mut self, frequency: f32) {
        self.note_on_with_velocity(frequency, 1.0);
    }

    pub fn note_on_with_velocity(&mut self, frequency: f32, velocity: f32) {
        if !frequency.is_finite() || frequency <= 0.0 {
            return;
        }
        self.age += 1;
        self.voice.note_on(0, frequency, velocity, self.age, &self.params);
    }

    pub fn note_off(&mut self) {
        self.voice.note_off();
    }

    pub fn is_playing(&self) -> bool {
        self.voice.is_active()
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        let dry = sanitize(self.voice.process(&self.params));
        hard_clip(sanitize(self.reverb.process(dry)), 1.0)
    }

    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.process();
        }
    }

    pub fn reset(&mut self) {
        self.voice.force_stop();
        self.reverb.reset();
    }
}
