#![allow(dead_code)]

use std::sync::Once;

use log::LevelFilter;
use pmsynth::{Engine, ParamId};
use simple_logger::SimpleLogger;

pub const SAMPLE_RATE: f32 = 44_100.0;

static LOGGER: Once = Once::new();

/// Route engine log output to stderr. Safe to call from every test.
pub fn init_logger() {
    LOGGER.call_once(|| {
        let _ = SimpleLogger::new().with_level(LevelFilter::Debug).init();
    });
}

pub fn engine_with(params: &[(ParamId, f32)]) -> Engine {
    init_logger();
    let mut engine = Engine::new(SAMPLE_RATE);
    for &(id, value) in params {
        engine.set_param(id, value);
    }
    engine
}

pub fn render_seconds(engine: &mut Engine, seconds: f32) -> Vec<f32> {
    let mut out = vec![0.0; (seconds * SAMPLE_RATE) as usize];
    for block in out.chunks_mut(pmsynth::MAX_BLOCK_SIZE) {
        engine.render(block);
    }
    out
}
