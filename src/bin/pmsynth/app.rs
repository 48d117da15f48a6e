//! Audio device setup and the realtime callback.

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::{
    traits::{DeviceTrait, HostTrait, StreamTrait},
    SampleFormat,
};
use rtrb::RingBuffer;

use pmsynth::{
    synth::{EngineDiagnostics, SynthMessage},
    Engine, EngineConfig, MAX_BLOCK_SIZE,
};

use super::ui::UiApp;

/// Capacity of the UI -> audio control queue.
const CONTROL_QUEUE: usize = 256;
/// Capacity of the audio -> UI sample queue.
const SCOPE_QUEUE: usize = 16_384;
const STATUS_QUEUE: usize = 16;

pub fn run() -> EyreResult<()> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let supported = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;
    if supported.sample_format() != SampleFormat::F32 {
        return Err(eyre!(
            "default output uses {:?}; only f32 devices are supported",
            supported.sample_format()
        ));
    }

    let sample_rate = supported.sample_rate().0 as f32;
    let channels = supported.channels() as usize;

    let (control_tx, mut control_rx) = RingBuffer::<SynthMessage>::new(CONTROL_QUEUE);
    let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_QUEUE);
    let (mut status_tx, status_rx) = RingBuffer::<EngineDiagnostics>::new(STATUS_QUEUE);

    let mut engine = Engine::with_config(EngineConfig::with_sample_rate(sample_rate));
    let mut block = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            &supported.into(),
            move |data: &mut [f32], _| {
                engine.drain(&mut control_rx);

                let total_frames = data.len() / channels;
                let mut frames_written = 0;
                while frames_written < total_frames {
                    let frames = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let out = &mut block[..frames];
                    engine.render(out);

                    // Copy to output (mono to all channels)
                    let offset = frames_written * channels;
                    for (i, &s) in out.iter().enumerate() {
                        for ch in 0..channels {
                            data[offset + i * channels + ch] = s;
                        }
                        // the scope is best effort; drop samples when it lags
                        let _ = scope_tx.push(s);
                    }
                    frames_written += frames;
                }

                let _ = status_tx.push(engine.diagnostics());
            },
            |err| eprintln!("Audio error: {}", err),
            None,
        )
        .wrap_err("failed to build output stream")?;

    stream.play().wrap_err("failed to start output stream")?;

    let mut terminal = ratatui::init();
    let result = UiApp::new(sample_rate, control_tx, scope_rx, status_rx).run(&mut terminal);
    ratatui::restore();
    result
}
