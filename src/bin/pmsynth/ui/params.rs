//! Parameter list with the current selection highlighted.

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use pmsynth::{ParamId, Params};

fn describe(id: ParamId, params: &Params) -> String {
    match id {
        ParamId::Algorithm => params.algorithm().name().to_string(),
        ParamId::InterfaceType => params.interface_kind().name().to_string(),
        _ => format!("{:.2}", params.get(id)),
    }
}

pub fn render_params(frame: &mut Frame, area: Rect, params: &Params, selected: usize) {
    let block = Block::default().title(" Parameters ").borders(Borders::ALL);

    // keep the selection visible when the list is taller than the pane
    let visible = area.height.saturating_sub(2) as usize;
    let first = selected.saturating_sub(visible.saturating_sub(1));

    let lines: Vec<Line> = ParamId::ALL
        .iter()
        .enumerate()
        .skip(first)
        .take(visible)
        .map(|(i, &id)| {
            let style = if i == selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            Line::from(vec![
                Span::styled(format!(" {:<22}", id.name()), style),
                Span::styled(format!("{:>8} ", describe(id, params)), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
