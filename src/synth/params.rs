//! The parameter surface shared by every voice of an engine.
//!
//! Values are stored already clamped to their range. Every write that actually
//! changes a value bumps [`Params::version`]; voices compare that number against
//! the one they last applied and only re-apply the set when it moved.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::oscillator::Algorithm;
use crate::interface::InterfaceKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ParamId {
    Algorithm,
    Param1,
    Param2,
    ToneLevel,
    NoiseLevel,
    DcLevel,
    Attack,
    Release,
    InterfaceType,
    Intensity,
    Tuning,
    Ratio,
    Delay1Feedback,
    Delay2Feedback,
    FilterFeedback,
    FilterFrequency,
    FilterQ,
    FilterShape,
    LfoFrequency,
    ModulationTypeLevel,
    ReverbSize,
    ReverbLevel,
    MasterGain,
}

impl ParamId {
    pub const COUNT: usize = 23;

    pub const ALL: [ParamId; Self::COUNT] = [
        ParamId::Algorithm,
        ParamId::Param1,
        ParamId::Param2,
        ParamId::ToneLevel,
        ParamId::NoiseLevel,
        ParamId::DcLevel,
        ParamId::Attack,
        ParamId::Release,
        ParamId::InterfaceType,
        ParamId::Intensity,
        ParamId::Tuning,
        ParamId::Ratio,
        ParamId::Delay1Feedback,
        ParamId::Delay2Feedback,
        ParamId::FilterFeedback,
        ParamId::FilterFrequency,
        ParamId::FilterQ,
        ParamId::FilterShape,
        ParamId::LfoFrequency,
        ParamId::ModulationTypeLevel,
        ParamId::ReverbSize,
        ParamId::ReverbLevel,
        ParamId::MasterGain,
    ];

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn name(&self) -> &'static str {
        match self {
            ParamId::Algorithm => "algorithm",
            ParamId::Param1 => "param1",
            ParamId::Param2 => "param2",
            ParamId::ToneLevel => "tone_level",
            ParamId::NoiseLevel => "noise_level",
            ParamId::DcLevel => "dc_level",
            ParamId::Attack => "attack",
            ParamId::Release => "release",
            ParamId::InterfaceType => "interface_type",
            ParamId::Intensity => "intensity",
            ParamId::Tuning => "tuning",
            ParamId::Ratio => "ratio",
            ParamId::Delay1Feedback => "delay1_feedback",
            ParamId::Delay2Feedback => "delay2_feedback",
            ParamId::FilterFeedback => "filter_feedback",
            ParamId::FilterFrequency => "filter_frequency",
            ParamId::FilterQ => "filter_q",
            ParamId::FilterShape => "filter_shape",
            ParamId::LfoFrequency => "lfo_frequency",
            ParamId::ModulationTypeLevel => "modulation_type_level",
            ParamId::ReverbSize => "reverb_size",
            ParamId::ReverbLevel => "reverb_level",
            ParamId::MasterGain => "master_gain",
        }
    }

    /// Inclusive `(min, max)`. Discrete selectors use an index range; every
    /// other id is normalized.
    pub fn range(&self) -> (f32, f32) {
        match self {
            ParamId::Algorithm => (0.0, (Algorithm::COUNT - 1) as f32),
            ParamId::InterfaceType => (0.0, (InterfaceKind::COUNT - 1) as f32),
            _ => (0.0, 1.0),
        }
    }

    /// Selectors round to whole indices on write.
    pub fn is_discrete(&self) -> bool {
        matches!(self, ParamId::Algorithm | ParamId::InterfaceType)
    }

    pub fn default_value(&self) -> f32 {
        match self {
            ParamId::Algorithm => 7.0,
            ParamId::Param1 => 0.55,
            ParamId::Param2 => 0.5,
            ParamId::ToneLevel => 0.7,
            ParamId::NoiseLevel => 0.1,
            ParamId::DcLevel => 0.5,
            ParamId::Attack => 0.33,
            ParamId::Release => 0.28,
            ParamId::InterfaceType => 2.0,
            ParamId::Intensity => 0.5,
            ParamId::Tuning => 0.5,
            ParamId::Ratio => 0.5,
            ParamId::Delay1Feedback => 0.96,
            ParamId::Delay2Feedback => 0.96,
            ParamId::FilterFeedback => 0.0,
            ParamId::FilterFrequency => 0.57,
            ParamId::FilterQ => 0.18,
            ParamId::FilterShape => 0.0,
            ParamId::LfoFrequency => 0.74,
            ParamId::ModulationTypeLevel => 0.5,
            ParamId::ReverbSize => 0.5,
            ParamId::ReverbLevel => 0.3,
            ParamId::MasterGain => 0.8,
        }
    }

    /// Clamp (and for selectors, round) a raw value into this id's range.
    pub fn clamp(&self, value: f32) -> f32 {
        let (min, max) = self.range();
        let value = if value.is_finite() {
            value
        } else {
            self.default_value()
        };
        let value = if self.is_discrete() {
            value.round()
        } else {
            value
        };
        value.clamp(min, max)
    }

    /// Convert a 0..100 control into this id's range.
    pub fn from_percent(&self, percent: f32) -> f32 {
        let (min, max) = self.range();
        min + (max - min) * (percent / 100.0)
    }
}

/// Versioned parameter values.
#[derive(Debug, Clone, PartialEq)]
pub struct Params {
    values: [f32; ParamId::COUNT],
    version: u64,
}

impl Default for Params {
    fn default() -> Self {
        Self::new()
    }
}

impl Params {
    /// Every id at its default. The version starts at 1 so that a voice which has
    /// never synced (version 0) always picks the set up.
    pub fn new() -> Self {
        Self {
            values: ParamId::ALL.map(|id| id.default_value()),
            version: 1,
        }
    }

    #[inline]
    pub fn get(&self, id: ParamId) -> f32 {
        self.values[id.index()]
    }

    /// Store a clamped value. Returns `true` and bumps the version only when the
    /// stored value changed.
    pub fn set(&mut self, id: ParamId, value: f32) -> bool {
        let value = id.clamp(value);
        let slot = &mut self.values[id.index()];
        if *slot == value {
            return false;
        }
        *slot = value;
        self.version += 1;
        true
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn algorithm(&self) -> Algorithm {
        Algorithm::from_index(self.get(ParamId::Algorithm) as i32)
    }

    pub fn interface_kind(&self) -> InterfaceKind {
        InterfaceKind::from_index(self.get(ParamId::InterfaceType) as i32)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ParamId, f32)> + '_ {
        ParamId::ALL.iter().map(move |&id| (id, self.get(id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewriting_the_same_value_keeps_the_version() {
        let mut params = Params::new();
        let version = params.version();
        assert!(!params.set(ParamId::FilterQ, 0.18));
        assert_eq!(params.version(), version);

        assert!(params.set(ParamId::FilterQ, 0.4));
        assert_eq!(params.version(), version + 1);
        assert!(!params.set(ParamId::FilterQ, 0.4));
        assert_eq!(params.version(), version + 1);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut params = Params::new();
        params.set(ParamId::Intensity, 3.0);
        assert_eq!(params.get(ParamId::Intensity), 1.0);
        params.set(ParamId::Intensity, -3.0);
        assert_eq!(params.get(ParamId::Intensity), 0.0);
        params.set(ParamId::InterfaceType, 40.0);
        assert_eq!(params.get(ParamId::InterfaceType), 11.0);
        params.set(ParamId::Algorithm, 2.4);
        assert_eq!(params.get(ParamId::Algorithm), 2.0);
    }

    #[test]
    fn clamped_duplicate_is_not_a_change() {
        let mut params = Params::new();
        params.set(ParamId::MasterGain, 1.0);
        let version = params.version();
        assert!(!params.set(ParamId::MasterGain, 7.0));
        assert_eq!(params.version(), version);
    }

    #[test]
    fn non_finite_writes_fall_back_to_default() {
        let mut params = Params::new();
        params.set(ParamId::Tuning, 0.9);
        params.set(ParamId::Tuning, f32::NAN);
        assert_eq!(params.get(ParamId::Tuning), ParamId::Tuning.default_value());
    }

    #[test]
    fn defaults_select_sawtooth_and_reed() {
        let params = Params::new();
        assert_eq!(params.algorithm(), Algorithm::Sawtooth);
        assert_eq!(params.interface_kind(), InterfaceKind::Reed);
        assert_eq!(params.iter().count(), ParamId::COUNT);
    }

    #[test]
    fn percent_scales_to_range() {
        assert_eq!(ParamId::Attack.from_percent(50.0), 0.5);
        assert_eq!(ParamId::InterfaceType.from_percent(100.0), 11.0);
    }
}
