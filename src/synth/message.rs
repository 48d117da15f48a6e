#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use crate::synth::params::ParamId;

/// Control events delivered to an engine from outside the audio callback.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum SynthMessage {
    NoteOn { note: u8, frequency: f32, velocity: f32 },
    NoteOff { note: u8 },
    AllNotesOff,
    SetParam { id: ParamId, value: f32 },
}

impl SynthMessage {
    /// Note-on at equal-tempered pitch, full velocity.
    pub fn note_on(note: u8) -> Self {
        SynthMessage::NoteOn {
            note,
            frequency: crate::frequency_from_note(note as i32),
            velocity: 1.0,
        }
    }
}

/// Non-blocking source of [`SynthMessage`]s.
pub trait MessageReceiver {
    fn pop(&mut self) -> Option<SynthMessage>;
}

#[cfg(feature = "rtrb")]
impl MessageReceiver for Consumer<SynthMessage> {
    fn pop(&mut self) -> Option<SynthMessage> {
        Consumer::pop(self).ok()
    }
}
