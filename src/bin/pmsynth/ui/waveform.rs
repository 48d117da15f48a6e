//! Oscilloscope with a zero-crossing pitch readout

use pmsynth::analysis;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Samples shown on screen; the tail of the buffer.
const SCOPE_WINDOW: usize = 512;

pub fn render_waveform(frame: &mut Frame, area: Rect, audio_buffer: &[f32], sample_rate: f32) {
    let start = audio_buffer.len().saturating_sub(SCOPE_WINDOW);
    let window = &audio_buffer[start..];

    // Pitch from the whole buffer, the window is too short for low notes
    let title = if analysis::peak(audio_buffer) > 1e-3 {
        let hz = analysis::zero_crossing_frequency(audio_buffer, sample_rate);
        format!(" Waveform  ~{:.0} Hz ", hz)
    } else {
        " Waveform ".to_string()
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    let data: Vec<(f64, f64)> = window
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64 / window.len().max(1) as f64, sample as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
