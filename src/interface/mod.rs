//! Interface: the nonlinearity where excitation meets the resonant body.
//!
//! Twelve "playing techniques" share one contract: take the enveloped
//! excitation plus the loop feedback, return a sample in [-1, 1]. They differ in
//! the transfer curve and in what private state they carry between samples.
//!
//! ```text
//!   index  kind      family    state
//!   0      Pluck     struck    peak follower, previous input
//!   1      Hit       struck    -
//!   2      Reed      blown     -
//!   3      Flute     blown     - (breath noise while gated)
//!   4      Brass     blown     -
//!   5      Bow       bowed     stick/slip memory
//!   6      Bell      struck    free-running phase
//!   7      Drum      struck    energy accumulator
//!   8      Crystal   exotic    three leaky integrators
//!   9      Vapor     exotic    three logistic maps, two output taps
//!   10     Quantum   exotic    -
//!   11     Plasma    exotic    amplitude follower, phase, allpass memory
//! ```
//!
//! Dispatch is a plain `match` over [`Technique`]; switching kinds swaps the
//! state in place with no allocation. Intensity and gate live in [`Interface`]
//! rather than in the techniques, so they survive every switch.

mod blown;
mod bowed;
mod exotic;
mod struck;

pub use blown::{Brass, Flute, Reed};
pub use bowed::Bow;
pub use exotic::{Crystal, Plasma, Quantum, Vapor};
pub use struck::{Bell, Drum, Hit, Pluck};

use crate::dsp::random::Random;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InterfaceKind {
    Pluck,
    Hit,
    Reed,
    Flute,
    Brass,
    Bow,
    Bell,
    Drum,
    Crystal,
    Vapor,
    Quantum,
    Plasma,
}

impl InterfaceKind {
    pub const COUNT: usize = 12;

    pub const ALL: [InterfaceKind; Self::COUNT] = [
        InterfaceKind::Pluck,
        InterfaceKind::Hit,
        InterfaceKind::Reed,
        InterfaceKind::Flute,
        InterfaceKind::Brass,
        InterfaceKind::Bow,
        InterfaceKind::Bell,
        InterfaceKind::Drum,
        InterfaceKind::Crystal,
        InterfaceKind::Vapor,
        InterfaceKind::Quantum,
        InterfaceKind::Plasma,
    ];

    /// Anything outside `0..=11` selects [`InterfaceKind::Reed`].
    pub fn from_index(index: i32) -> Self {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .unwrap_or(InterfaceKind::Reed)
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            InterfaceKind::Pluck => "pluck",
            InterfaceKind::Hit => "hit",
            InterfaceKind::Reed => "reed",
            InterfaceKind::Flute => "flute",
            InterfaceKind::Brass => "brass",
            InterfaceKind::Bow => "bow",
            InterfaceKind::Bell => "bell",
            InterfaceKind::Drum => "drum",
            InterfaceKind::Crystal => "crystal",
            InterfaceKind::Vapor => "vapor",
            InterfaceKind::Quantum => "quantum",
            InterfaceKind::Plasma => "plasma",
        }
    }

    /// Whether the technique keeps state that a fresh note clears.
    pub fn is_stateful(&self) -> bool {
        !matches!(
            self,
            InterfaceKind::Hit
                | InterfaceKind::Reed
                | InterfaceKind::Flute
                | InterfaceKind::Brass
                | InterfaceKind::Quantum
        )
    }
}

/// Per-sample inputs every technique may read.
pub struct Drive<'a> {
    pub intensity: f32,
    pub gate: bool,
    pub rng: &'a mut Random,
}

/// One playing technique.
///
/// `process` must depend only on its arguments and `self`. The caller clamps the
/// result, but every implementation clamps its own output too.
pub trait Strategy {
    fn process(&mut self, input: f32, drive: &mut Drive<'_>) -> f32;

    /// Clear transient state. Called on every rising gate edge and on
    /// [`Interface::reset`]. Stateless techniques keep the default no-op.
    fn reset(&mut self) {}
}

/// State for whichever technique is active.
#[derive(Debug, Clone)]
pub enum Technique {
    Pluck(Pluck),
    Hit(Hit),
    Reed(Reed),
    Flute(Flute),
    Brass(Brass),
    Bow(Bow),
    Bell(Bell),
    Drum(Drum),
    Crystal(Crystal),
    Vapor(Vapor),
    Quantum(Quantum),
    Plasma(Plasma),
}

impl Technique {
    pub fn new(kind: InterfaceKind, sample_rate: f32) -> Self {
        match kind {
            InterfaceKind::Pluck => Technique::Pluck(Pluck::default()),
            InterfaceKind::Hit => Technique::Hit(Hit),
            InterfaceKind::Reed => Technique::Reed(Reed),
            InterfaceKind::Flute => Technique::Flute(Flute),
            InterfaceKind::Brass => Technique::Brass(Brass),
            InterfaceKind::Bow => Technique::Bow(Bow::default()),
            InterfaceKind::Bell => Technique::Bell(Bell::default()),
            InterfaceKind::Drum => Technique::Drum(Drum::default()),
            InterfaceKind::Crystal => Technique::Crystal(Crystal::default()),
            InterfaceKind::Vapor => Technique::Vapor(Vapor::default()),
            InterfaceKind::Quantum => Technique::Quantum(Quantum),
            InterfaceKind::Plasma => Technique::Plasma(Plasma::new(sample_rate)),
        }
    }
}

macro_rules! dispatch {
    ($technique:expr, $s:ident => $body:expr) => {
        match $technique {
            Technique::Pluck($s) => $body,
            Technique::Hit($s) => $body,
            Technique::Reed($s) => $body,
            Technique::Flute($s) => $body,
            Technique::Brass($s) => $body,
            Technique::Bow($s) => $body,
            Technique::Bell($s) => $body,
            Technique::Drum($s) => $body,
            Technique::Crystal($s) => $body,
            Technique::Vapor($s) => $body,
            Technique::Quantum($s) => $body,
            Technique::Plasma($s) => $body,
        }
    };
}

impl Strategy for Technique {
    #[inline]
    fn process(&mut self, input: f32, drive: &mut Drive<'_>) -> f32 {
        dispatch!(self, s => s.process(input, drive))
    }

    fn reset(&mut self) {
        dispatch!(self, s => s.reset())
    }
}

/// The interface stage of a voice: the active technique plus the controls that
/// outlive it.
pub struct Interface {
    sample_rate: f32,
    kind: InterfaceKind,
    technique: Technique,
    intensity: f32,
    gate: bool,
    rng: Random,
}

impl Interface {
    pub fn new(sample_rate: f32, seed: u64) -> Self {
        Self {
            sample_rate,
            kind: InterfaceKind::Reed,
            technique: Technique::new(InterfaceKind::Reed, sample_rate),
            intensity: 0.5,
            gate: false,
            rng: Random::new(seed),
        }
    }

    pub fn kind(&self) -> InterfaceKind {
        self.kind
    }

    /// Swap the technique. Intensity and gate carry over; the new technique
    /// starts from fresh state. Selecting the current kind is a no-op.
    pub fn set_kind(&mut self, kind: InterfaceKind) {
        if kind != self.kind {
            self.kind = kind;
            self.technique = Technique::new(kind, self.sample_rate);
        }
    }

    pub fn set_intensity(&mut self, value: f32) {
        self.intensity = value.clamp(0.0, 1.0);
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }

    /// A rising edge clears the technique's transient state.
    pub fn set_gate(&mut self, gate: bool) {
        let rising = gate && !self.gate;
        self.gate = gate;
        if rising {
            self.technique.reset();
        }
    }

    pub fn gate(&self) -> bool {
        self.gate
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let mut drive = Drive {
            intensity: self.intensity,
            gate: self.gate,
            rng: &mut self.rng,
        };
        self.technique.process(input, &mut drive).clamp(-1.0, 1.0)
    }

    pub fn reset(&mut self) {
        self.technique.reset();
    }
}
