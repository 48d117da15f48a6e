use log::{debug, info};

use crate::dsp::{random::derive_seed, shaping::sanitize, SchroederReverb};
use crate::synth::{
    config::EngineConfig,
    message::{MessageReceiver, SynthMessage},
    params::{ParamId, Params},
    voice::{Voice, VoiceState},
};

/// Point-in-time engine status, cheap enough to take from the audio thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineDiagnostics {
    pub active_voices: usize,
    pub releasing_voices: usize,
    pub param_version: u64,
    /// Largest output magnitude of the most recent render call.
    pub peak: f32,
}

/// Polyphonic engine: a fixed voice pool summed into one shared reverb.
pub struct Engine {
    config: EngineConfig,
    params: Params,
    voices: Vec<Voice>,
    reverb: SchroederReverb,
    next_age: u64,
    last_peak: f32,
}

impl Engine {
    pub fn new(sample_rate: f32) -> Self {
        Self::with_config(EngineConfig::with_sample_rate(sample_rate))
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let voices: Vec<Voice> = (0..config.voices.max(1))
            .map(|i| {
                Voice::new(
                    config.sample_rate,
                    derive_seed(config.seed, i as u64),
                    config.fm_routing,
                )
            })
            .collect();

        let params = Params::new();
        let mut reverb = SchroederReverb::new(config.sample_rate);
        reverb.set_size(params.get(ParamId::ReverbSize));
        reverb.set_level(params.get(ParamId::ReverbLevel));

        debug!(
            "engine: {} voices at {} Hz, seed {:#x}, fm {:?}",
            voices.len(),
            config.sample_rate,
            config.seed,
            config.fm_routing
        );

        Self {
            config,
            params,
            voices,
            reverb,
            next_age: 0,
            last_peak: 0.0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn sample_rate(&self) -> f32 {
        self.config.sample_rate
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    /// Write one parameter. Returns whether the stored value changed.
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

    /// 0..100 control surface.
    pub fn set_param_percent(&mut self, id: ParamId, percent: f32) -> bool {
        self.set_param(id, id.from_percent(percent))
    }

    all_param_setters!();

    pub fn note_on(&mut self, note: u8, frequency: f32) {
        self.note_on_with_velocity(note, frequency, 1.0);
    }

    pub fn note_on_with_velocity(&mut self, note: u8, frequency: f32, velocity: f32) {
        if !frequency.is_finite() || frequency <= 0.0 {
            return;
        }
        let index = self.allocate_voice(note);
        self.next_age += 1;
        let age = self.next_age;
        self.voices[index].note_on(note, frequency, velocity, age, &self.params);
    }

    pub fn note_off(&mut self, note: u8) {
        if let Some(voice) = self.find_voice(note) {
            voice.note_off();
        }
    }

    /// Hard stop: every voice silenced and the reverb tail cleared.
    pub fn all_notes_off(&mut self) {
        for voice in &mut self.voices {
            voice.force_stop();
        }
        self.reverb.reset();
    }

    pub fn handle_message(&mut self, message: SynthMessage) {
        match message {
            SynthMessage::NoteOn {
                note,
                frequency,
                velocity,
            } => self.note_on_with_velocity(note, frequency, velocity),
            SynthMessage::NoteOff { note } => self.note_off(note),
            SynthMessage::AllNotesOff => self.all_notes_off(),
            SynthMessage::SetParam { id, value } => {
                self.set_param(id, value);
            }
        }
    }

    /// Apply everything queued on `rx`. Never blocks. Returns the number of
    /// messages handled.
    pub fn drain<R: MessageReceiver>(&mut self, rx: &mut R) -> usize {
        let mut handled = 0;
        while let Some(message) = rx.pop() {
            self.handle_message(message);
            handled += 1;
        }
        handled
    }

    /// Render one frame.
    #[inline]
    pub fn process(&mut self) -> f32 {
        let out = self.next_frame();
        self.last_peak = out.abs();
        out
    }

    #[inline]
    fn next_frame(&mut self) -> f32 {
        let mut mix = 0.0;
        for voice in &mut self.voices {
            mix += voice.process(&self.params);
        }
        sanitize(self.reverb.process(sanitize(mix))).clamp(-1.0, 1.0)
    }

    pub fn render(&mut self, out: &mut [f32]) {
        let mut peak = 0.0f32;
        for sample in out.iter_mut() {
            *sample = self.next_frame();
            peak = peak.max(sample.abs());
        }
        self.last_peak = peak;
    }

    pub fn active_voice_count(&self) -> usize {
        self.voices.iter().filter(|v| v.is_active()).count()
    }

    pub fn diagnostics(&self) -> EngineDiagnostics {
        EngineDiagnostics {
            active_voices: self.active_voice_count(),
            releasing_voices: self
                .voices
                .iter()
                .filter(|v| v.state() == VoiceState::Releasing)
                .count(),
            param_version: self.params.version(),
            peak: self.last_peak,
        }
    }

    /// Opt-in status line for hosts. Not realtime-safe.
    pub fn log_diagnostics(&self) {
        let d = self.diagnostics();
        info!(
            "engine: {}/{} voices active ({} releasing), params v{}, peak {:.3}",
            d.active_voices,
            self.voices.len(),
            d.releasing_voices,
            d.param_version,
            d.peak
        );
    }

    /// Pick the voice for `note`: the one already playing it, else a free one,
    /// else a stolen one. Always returns a valid index.
    fn allocate_voice(&self, note: u8) -> usize {
        // First pass: retrigger
        if let Some(idx) = self
            .voices
            .iter()
            .position(|v| v.is_active() && v.note() == Some(note))
        {
            return idx;
        }

        // Second pass: free voice
        if let Some(idx) = self.voices.iter().position(|v| v.is_free()) {
            return idx;
        }

        // Third pass: steal the releasing voice that started earliest
        let releasing = self
            .voices
            .iter()
            .enumerate()
            .filter(|(_, v)| v.state() == VoiceState::Releasing)
            .min_by_key(|(_, v)| v.age())
            .map(|(idx, _)| idx);
        if let Some(idx) = releasing {
            return idx;
        }

        // Last resort: the quietest voice right now
        self.voices
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.level().total_cmp(&b.level()))
            .map(|(idx, _)| idx)
            .unwrap_or(0)
    }

    fn find_voice(&mut self, note: u8) -> Option<&mut Voice> {
        self.voices
            .iter_mut()
            .find(|v| v.note() == Some(note) && v.is_active())
    }
}
