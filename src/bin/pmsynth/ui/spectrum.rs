//! Spectrum view: Hann-windowed FFT sampled at log-spaced frequencies.

use std::sync::Arc;

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};

const SPECTRUM_POINTS: usize = 64;
const FLOOR_DB: f64 = -100.0;

pub struct SpectrumAnalyzer {
    window: Vec<f32>,
    /// FFT bin read for each display point
    bins: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (octaves above 20 Hz, dB)
    points: Vec<(f64, f64)>,
}

impl SpectrumAnalyzer {
    pub fn new(size: usize, sample_rate: f32) -> Self {
        let size = size.max(2);
        let fft = FftPlanner::<f32>::new().plan_fft_forward(size);
        let denom = (size - 1) as f32;
        let window = (0..size)
            .map(|i| 0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos()))
            .collect();

        let nyquist = (sample_rate / 2.0).min(20_000.0).max(40.0) as f64;
        let octaves = (nyquist / 20.0).log2();
        let last_bin = size / 2 - 1;
        let mut bins = Vec::with_capacity(SPECTRUM_POINTS);
        let mut points = Vec::with_capacity(SPECTRUM_POINTS);
        for i in 0..SPECTRUM_POINTS {
            let octave = octaves * i as f64 / (SPECTRUM_POINTS - 1) as f64;
            let hz = 20.0 * octave.exp2();
            let bin = ((hz * size as f64 / sample_rate as f64).round() as usize).clamp(1, last_bin);
            bins.push(bin);
            points.push((octave, FLOOR_DB));
        }

        Self {
            window,
            bins,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); size],
            points,
        }
    }

    /// Recompute from the most recent `window.len()` samples of `buffer`.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() < self.window.len() {
            return;
        }
        let recent = &buffer[buffer.len() - self.window.len()..];
        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(recent).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        for (point, &bin) in self.points.iter_mut().zip(&self.bins) {
            let power = self.scratch[bin].norm_sqr().max(1e-12) as f64;
            point.1 = (10.0 * power.log10()).max(FLOOR_DB);
        }
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.points
    }
}

pub fn render_spectrum(frame: &mut Frame, area: Rect, points: &[(f64, f64)]) {
    let block = Block::default()
        .title(" Spectrum (20 Hz, log) ")
        .borders(Borders::ALL);

    let max_octave = points.last().map(|p| p.0).unwrap_or(1.0).max(1.0);
    let max_db = points.iter().map(|p| p.1).fold(FLOOR_DB, f64::max);

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(points);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, max_octave])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([FLOOR_DB, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-60", "-20", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
