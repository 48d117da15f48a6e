//! Status bar - voices, parameter version and audio stats

use std::collections::BTreeSet;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use pmsynth::{analysis, synth::EngineDiagnostics};

pub fn render_status(
    frame: &mut Frame,
    area: Rect,
    status: Option<&EngineDiagnostics>,
    audio_buffer: &[f32],
    sample_rate: f32,
    octave: i32,
    held: &BTreeSet<u8>,
) {
    let block = Block::default().title(" pmsynth ").borders(Borders::ALL);

    let (active, releasing, version) = status
        .map(|s| (s.active_voices, s.releasing_voices, s.param_version))
        .unwrap_or((0, 0, 0));
    let held: Vec<String> = held.iter().map(|n| n.to_string()).collect();

    let line = Line::from(vec![
        Span::styled(
            format!(" Voices: {} ({} rel)  ", active, releasing),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("Octave: {}  ", octave),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("Held: [{}]  ", held.join(" ")),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("v{}  {:.1}kHz  ", version, sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(
                "Peak: {:.2}  RMS: {:.2}",
                analysis::peak(audio_buffer),
                analysis::rms(audio_buffer)
            ),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    frame.render_widget(Paragraph::new(line).block(block), area);
}
