//! Field rendering utilities for forms

use crate::state::FieldKind;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn border_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Bordered block titled with the field label
pub fn field_block(label: &str, is_active: bool) -> Block<'static> {
    Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(border_style(is_active))
}

/// Draw a single-line text or choice field
pub fn draw_field_with_value(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    kind: FieldKind,
    is_active: bool,
) {
    let style = if is_active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::Gray)
    };

    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let spans = match kind {
        FieldKind::Choice(_) if is_active => vec![
            Span::styled("◀ ", Style::default().fg(Color::Cyan)),
            Span::styled(display_value, style),
            Span::styled(" ▶", Style::default().fg(Color::Cyan)),
        ],
        FieldKind::Text if is_active => vec![
            Span::styled(display_value, style),
            Span::styled("▌", Style::default().fg(Color::Cyan)),
        ],
        _ => vec![Span::styled(display_value, style)],
    };

    let paragraph = Paragraph::new(Line::from(spans)).block(field_block(label, is_active));
    frame.render_widget(paragraph, area);
}

/// Draw a row of `key: description` hints
pub fn draw_help_text(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::raw(format!(": {description}  ")));
    }
    let help = Paragraph::new(Line::from(spans)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, area);
}
