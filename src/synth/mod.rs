// Purpose: voice composition, polyphony and the parameter surface
// This layer sits above the DSP modules and turns note events into audio

/// One named setter per parameter id, each forwarding to `set_param`.
macro_rules! param_setters {
    ($($setter:ident => $id:ident),* $(,)?) => {
        $(
            pub fn $setter(&mut self, value: f32) {
                self.set_param($crate::synth::params::ParamId::$id, value);
            }
        )*
    };
}

/// The full setter surface shared by both engines.
macro_rules! all_param_setters {
    () => {
        param_setters! {
            set_algorithm => Algorithm,
            set_param1 => Param1,
            set_param2 => Param2,
            set_tone_level => ToneLevel,
            set_noise_level => NoiseLevel,
            set_dc_level => DcLevel,
            set_attack => Attack,
            set_release => Release,
            set_interface_type => InterfaceType,
            set_intensity => Intensity,
            set_tuning => Tuning,
            set_ratio => Ratio,
            set_delay1_feedback => Delay1Feedback,
            set_delay2_feedback => Delay2Feedback,
            set_filter_feedback => FilterFeedback,
            set_filter_frequency => FilterFrequency,
            set_filter_q => FilterQ,
            set_filter_shape => FilterShape,
            set_lfo_frequency => LfoFrequency,
            set_modulation_type_level => ModulationTypeLevel,
            set_reverb_size => ReverbSize,
            set_reverb_level => ReverbLevel,
            set_master_gain => MasterGain,
        }
    };
}

pub mod config;
pub mod message;
pub mod mono;
pub mod params;
pub mod poly;
pub mod voice;

pub use config::{EngineConfig, FmRouting};
pub use message::{MessageReceiver, SynthMessage};
pub use mono::MonoSynth;
pub use params::{ParamId, Params};
pub use poly::{Engine, EngineDiagnostics};
pub use voice::{Voice, VoiceState};
