//! pmsynth - play the physical-model engine from the terminal
//!
//! Run with: cargo run --release

mod app;
mod keyboard;
mod ui;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    app::run()
}
