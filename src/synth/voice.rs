//! One complete physical-model signal chain.
//!
//! ```text
//!            ┌──────────── feedback (previous sample) ◄──────────────┐
//!            │                                                        │
//!            ▼                                                        │
//!   source ─► × env ─► (+) ─► interface ─► resonator ─► filter ─► × am × gain ─► out
//!                       ▲                     │  │          │
//!                       └── DC blocker ◄── mixer ◄──────────┘
//! ```
//!
//! The loop is closed through values stored on the previous call, so each
//! sample is computed in a fixed order without solving for a zero-delay path.

use crate::dsp::{
    random::derive_seed,
    shaping::sanitize,
    DcBlocker, Envelope, FeedbackMixer, Modulation, ModulationState, MorphFilter, Resonator,
    Source,
};
use crate::interface::Interface;
use crate::synth::{
    config::FmRouting,
    params::{ParamId, Params},
};

/// Below this magnitude a released voice counts as silent.
pub const TAIL_EPSILON: f32 = 1e-5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceState {
    Free,      // Available for allocation
    Active,    // Gate held
    Releasing, // Gate dropped, tail still ringing
}

pub struct Voice {
    source: Source,
    envelope: Envelope,
    interface: Interface,
    resonator: Resonator,
    feedback: FeedbackMixer,
    dc_blocker: DcBlocker,
    filter: MorphFilter,
    modulation: Modulation,
    fm_routing: FmRouting,

    note: Option<u8>,
    frequency: f32,
    velocity: f32,
    state: VoiceState,
    age: u64,
    params_version: u64,
    master_gain: f32,

    prev_delay1: f32,
    prev_delay2: f32,
    prev_filter: f32,
    last_feedback: f32,
    last_output: f32,
}

impl Voice {
    pub fn new(sample_rate: f32, seed: u64, fm_routing: FmRouting) -> Self {
        Self {
            source: Source::new(sample_rate, derive_seed(seed, 0)),
            envelope: Envelope::new(sample_rate),
            interface: Interface::new(sample_rate, derive_seed(seed, 1)),
            resonator: Resonator::new(sample_rate, derive_seed(seed, 2)),
            feedback: FeedbackMixer::new(),
            dc_blocker: DcBlocker::new(),
            filter: MorphFilter::new(sample_rate),
            modulation: Modulation::new(sample_rate),
            fm_routing,
            note: None,
            frequency: 440.0,
            velocity: 1.0,
            state: VoiceState::Free,
            age: 0,
            params_version: 0,
            master_gain: 1.0,
            prev_delay1: 0.0,
            prev_delay2: 0.0,
            prev_filter: 0.0,
            last_feedback: 0.0,
            last_output: 0.0,
        }
    }

    /// Push every parameter into the modules, regardless of version.
    pub fn apply_params(&mut self, params: &Params) {
        self.source.set_algorithm(params.algorithm());
        self.source.set_param1(params.get(ParamId::Param1));
        self.source.set_param2(params.get(ParamId::Param2));
        self.source.set_tone_level(params.get(ParamId::ToneLevel));
        self.source.set_noise_level(params.get(ParamId::NoiseLevel));
        self.source.set_dc_level(params.get(ParamId::DcLevel));

        self.envelope.set_attack(params.get(ParamId::Attack));
        self.envelope.set_release(params.get(ParamId::Release));

        self.interface.set_kind(params.interface_kind());
        self.interface.set_intensity(params.get(ParamId::Intensity));

        self.resonator.set_tuning(params.get(ParamId::Tuning));
        self.resonator.set_ratio(params.get(ParamId::Ratio));

        self.feedback.set_delay1(params.get(ParamId::Delay1Feedback));
        self.feedback.set_delay2(params.get(ParamId::Delay2Feedback));
        self.feedback.set_filter(params.get(ParamId::FilterFeedback));

        self.filter.set_frequency(params.get(ParamId::FilterFrequency));
        self.filter.set_q(params.get(ParamId::FilterQ));
        self.filter.set_shape(params.get(ParamId::FilterShape));

        self.modulation.set_frequency(params.get(ParamId::LfoFrequency));
        self.modulation.set_type_level(params.get(ParamId::ModulationTypeLevel));

        self.master_gain = params.get(ParamId::MasterGain);
        self.params_version = params.version();
    }

    /// Re-apply the set only if it changed since the last sync.
    #[inline]
    fn sync(&mut self, params: &Params) {
        if self.params_version != params.version() {
            self.apply_params(params);
        }
    }

    /// Start (or restart) a note. Every module is cleared first so nothing from a
    /// previous note leaks into this one.
    pub fn note_on(&mut self, note: u8, frequency: f32, velocity: f32, age: u64, params: &Params) {
        self.clear();

        self.note = Some(note);
        self.frequency = frequency;
        self.velocity = velocity.clamp(0.0, 1.0);
        self.age = age;
        self.state = VoiceState::Active;

        self.params_version = 0;
        self.sync(params);
        self.resonator.set_frequency(frequency);

        self.envelope.set_gate(true);
        self.interface.set_gate(true);
    }

    /// Drop the gate. The voice keeps sounding until its tail dies out.
    pub fn note_off(&mut self) {
        if self.state == VoiceState::Active {
            self.state = VoiceState::Releasing;
            self.envelope.set_gate(false);
            self.interface.set_gate(false);
        }
    }

    /// Silence immediately and return to the pool.
    pub fn force_stop(&mut self) {
        self.clear();
        self.state = VoiceState::Free;
        self.note = None;
    }

    fn clear(&mut self) {
        self.source.reset();
        self.envelope.reset();
        self.interface.set_gate(false);
        self.interface.reset();
        self.resonator.reset();
        self.dc_blocker.reset();
        self.filter.reset();
        self.modulation.reset();
        self.prev_delay1 = 0.0;
        self.prev_delay2 = 0.0;
        self.prev_filter = 0.0;
        self.last_feedback = 0.0;
        self.last_output = 0.0;
    }

    /// Render one sample. Free voices return silence without touching any state.
    #[inline]
    pub fn process(&mut self, params: &Params) -> f32 {
        if self.state == VoiceState::Free {
            return 0.0;
        }
        self.sync(params);

        let ModulationState { am, fm, .. } = self.modulation.next_state();
        let source_frequency = match self.fm_routing {
            FmRouting::SourcePitch => self.frequency * fm,
            FmRouting::OutputScale => self.frequency,
        };

        let excitation = self.source.next_sample(source_frequency);
        let enveloped = excitation * self.envelope.next_sample();

        let feedback = sanitize(
            self.feedback
                .process(self.prev_delay1, self.prev_delay2, self.prev_filter),
        );
        let clean_feedback = self.dc_blocker.next_sample(feedback);
        self.last_feedback = clean_feedback;

        let shaped =
            sanitize(self.interface.process(sanitize(enveloped + clean_feedback))).clamp(-1.0, 1.0);
        let taps = self.resonator.process(shaped, self.frequency);
        let filtered = sanitize(self.filter.next_sample((taps.delay1 + taps.delay2) * 0.5));

        let mut output = filtered * am * self.master_gain * self.velocity;
        if self.fm_routing == FmRouting::OutputScale {
            output *= fm;
        }
        let output = sanitize(output).clamp(-1.0, 1.0);

        self.prev_delay1 = taps.delay1;
        self.prev_delay2 = taps.delay2;
        self.prev_filter = filtered;
        self.last_output = output;

        if !self.envelope.is_playing()
            && output.abs() < TAIL_EPSILON
            && taps.delay1.abs() < TAIL_EPSILON
            && taps.delay2.abs() < TAIL_EPSILON
        {
            self.state = VoiceState::Free;
            self.note = None;
        }

        output
    }

    pub fn note(&self) -> Option<u8> {
        self.note
    }

    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    pub fn state(&self) -> VoiceState {
        self.state
    }

    pub fn is_free(&self) -> bool {
        self.state == VoiceState::Free
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, VoiceState::Active | VoiceState::Releasing)
    }

    pub fn age(&self) -> u64 {
        self.age
    }

    /// Magnitude of the most recent output sample.
    pub fn level(&self) -> f32 {
        self.last_output.abs()
    }

    pub fn envelope_level(&self) -> f32 {
        self.envelope.level()
    }

    /// DC-blocked feedback fed into the interface on the last sample.
    pub fn last_feedback(&self) -> f32 {
        self.last_feedback
    }

    /// Current resonator lengths in samples.
    pub fn delay_lengths(&self) -> (f32, f32) {
        self.resonator.lengths()
    }

    pub fn params_version(&self) -> u64 {
        self.params_version
    }
}
