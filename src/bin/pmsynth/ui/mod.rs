//! Terminal UI: piano keys, a parameter list and two scopes.

mod params;
mod spectrum;
mod status;
mod waveform;

use std::collections::BTreeSet;
use std::time::Duration;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use rtrb::{Consumer, Producer};

use pmsynth::{
    frequency_from_note,
    synth::{EngineDiagnostics, SynthMessage},
    ParamId, Params,
};

use super::keyboard::note_for_key;
use params::render_params;
use spectrum::{render_spectrum, SpectrumAnalyzer};
use status::render_status;
use waveform::render_waveform;

/// Samples kept for the scope and the FFT.
const VIS_BUFFER_SIZE: usize = 2048;
const FINE_STEP: f32 = 0.01;
const COARSE_STEP: f32 = 0.1;

pub struct UiApp {
    control_tx: Producer<SynthMessage>,
    scope_rx: Consumer<f32>,
    status_rx: Consumer<EngineDiagnostics>,
    /// Local mirror of what has been sent to the engine.
    params: Params,
    selected: usize,
    octave: i32,
    held: BTreeSet<u8>,
    status: Option<EngineDiagnostics>,
    audio_buffer: Vec<f32>,
    spectrum: SpectrumAnalyzer,
    sample_rate: f32,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        sample_rate: f32,
        control_tx: Producer<SynthMessage>,
        scope_rx: Consumer<f32>,
        status_rx: Consumer<EngineDiagnostics>,
    ) -> Self {
        Self {
            control_tx,
            scope_rx,
            status_rx,
            params: Params::new(),
            selected: 0,
            octave: 4,
            held: BTreeSet::new(),
            status: None,
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            spectrum: SpectrumAnalyzer::new(VIS_BUFFER_SIZE, sample_rate),
            sample_rate,
            should_quit: false,
        }
    }

    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_status();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }
        self.send(SynthMessage::AllNotesOff);
        Ok(())
    }

    fn poll_audio(&mut self) {
        let mut received = false;
        while let Ok(sample) = self.scope_rx.pop() {
            self.audio_buffer.push(sample);
            received = true;
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
        if received {
            self.spectrum.update(&self.audio_buffer);
        }
    }

    fn poll_status(&mut self) {
        while let Ok(status) = self.status_rx.pop() {
            self.status = Some(status);
        }
    }

    fn send(&mut self, message: SynthMessage) {
        // a full queue means the audio thread is stalled; dropping is fine
        let _ = self.control_tx.push(message);
    }

    fn selected_id(&self) -> ParamId {
        ParamId::ALL[self.selected]
    }

    fn nudge(&mut self, direction: f32, coarse: bool) {
        let id = self.selected_id();
        let step = if id.is_discrete() {
            1.0
        } else if coarse {
            COARSE_STEP
        } else {
            FINE_STEP
        };
        let value = self.params.get(id) + direction * step;
        if self.params.set(id, value) {
            let value = self.params.get(id);
            self.send(SynthMessage::SetParam { id, value });
        }
    }

    fn toggle_note(&mut self, note: u8) {
        if self.held.remove(&note) {
            self.send(SynthMessage::NoteOff { note });
        } else {
            self.held.insert(note);
            self.send(SynthMessage::NoteOn {
                note,
                frequency: frequency_from_note(note as i32),
                velocity: 1.0,
            });
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(' ') => {
                self.held.clear();
                self.send(SynthMessage::AllNotesOff);
            }
            KeyCode::Char('-') => self.octave = (self.octave - 1).max(0),
            KeyCode::Char('=') => self.octave = (self.octave + 1).min(8),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => self.selected = (self.selected + 1).min(ParamId::COUNT - 1),
            KeyCode::Left => self.nudge(-1.0, false),
            KeyCode::Right => self.nudge(1.0, false),
            KeyCode::PageDown => self.nudge(-1.0, true),
            KeyCode::PageUp => self.nudge(1.0, true),
            KeyCode::Char(c) => {
                if let Some(note) = note_for_key(c, self.octave) {
                    self.toggle_note(note);
                }
            }
            _ => {}
        }
    }

    fn render(&self, frame: &mut Frame) {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Status bar
                Constraint::Min(10),   // Params + scopes
                Constraint::Length(1), // Help bar
            ])
            .split(frame.area());

        render_status(
            frame,
            rows[0],
            self.status.as_ref(),
            &self.audio_buffer,
            self.sample_rate,
            self.octave,
            &self.held,
        );

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(34), Constraint::Min(20)])
            .split(rows[1]);
        render_params(frame, columns[0], &self.params, self.selected);

        let scopes = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(columns[1]);
        render_waveform(frame, scopes[0], &self.audio_buffer, self.sample_rate);
        render_spectrum(frame, scopes[1], self.spectrum.data());

        let help = Paragraph::new(
            " [z..m / q..u] Notes  [-/=] Octave  [↑↓] Param  [←→ PgUp/PgDn] Adjust  [Space] All off  [Esc] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, rows[2]);
    }
}
