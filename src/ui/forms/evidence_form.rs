//! Evidence form rendering

use super::field_renderer::{draw_field_with_value, draw_help_text, field_block};
use crate::app::{App, REQUIRED_FIELDS_HINT};
use crate::client::EvidenceApi;
use crate::platform::{
    ADD_ENTRY_SHORTCUT, REMOVE_ENTRY_SHORTCUT, SUBMIT_SHORTCUT, TEMPLATE_SHORTCUT,
};
use crate::state::{AppState, FormField, MAX_IMAGES};
use crate::ui::components::{render_button, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use std::ops::Range;

/// Draw the form with the actions panel on the right
pub fn draw<A: EvidenceApi>(frame: &mut Frame, area: Rect, app: &App<A>) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(40),    // Form area
            Constraint::Length(30), // Actions panel
        ])
        .split(area);

    draw_form(frame, chunks[0], &app.state);
    draw_actions_panel(frame, chunks[1], &app.state);
}

fn draw_form(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Evidence Submission ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Fields
            Constraint::Length(1), // Help text
        ])
        .split(inner);

    let fields = state.fields();
    let heights: Vec<u16> = fields.iter().map(|f| field_height(state, *f)).collect();
    let visible = visible_range(&heights, state.active_form_field, chunks[0].height);

    let mut y = chunks[0].y;
    let bottom = chunks[0].y + chunks[0].height;
    for index in visible {
        let height = heights[index].min(bottom.saturating_sub(y));
        if height == 0 {
            break;
        }
        let rect = Rect {
            x: chunks[0].x,
            y,
            width: chunks[0].width,
            height,
        };
        draw_form_field(frame, rect, state, fields[index], index == state.active_form_field);
        y += height;
    }

    draw_help_text(
        frame,
        chunks[1],
        &[
            ("Tab", "next"),
            ("←/→", "choose"),
            ("Enter", "attach"),
            ("Del", "remove"),
            ("Esc", "quit"),
        ],
    );
}

/// Rows needed to draw `field`
fn field_height(state: &AppState, field: FormField) -> u16 {
    match field {
        FormField::Spreadsheet => 4,
        FormField::Images(i) => {
            let images = state.form.evidence().get(i).map_or(0, |e| e.images.len());
            2 + images.max(1) as u16 + 1
        }
        FormField::Submit => BUTTON_HEIGHT + 1,
        _ => 3,
    }
}

/// Fields that fit in `available` rows, scrolled so `active` is visible
fn visible_range(heights: &[u16], active: usize, available: u16) -> Range<usize> {
    if heights.is_empty() {
        return 0..0;
    }
    let active = active.min(heights.len() - 1);

    let mut start = 0;
    while start < active && heights[start..=active].iter().sum::<u16>() > available {
        start += 1;
    }

    let mut end = start;
    let mut used = 0u16;
    while end < heights.len() && used + heights[end] <= available {
        used += heights[end];
        end += 1;
    }
    start..end.max(start + 1)
}

fn draw_form_field(frame: &mut Frame, area: Rect, state: &AppState, field: FormField, active: bool) {
    match field {
        FormField::Spreadsheet => {
            let current = state
                .form
                .spreadsheet()
                .map(|s| Span::styled(s.name.clone(), Style::default().fg(Color::Green)))
                .unwrap_or_else(|| Span::styled("(none)", Style::default().fg(Color::DarkGray)));
            let lines = vec![Line::from(current), path_input_line(state, active)];
            frame.render_widget(
                Paragraph::new(lines).block(field_block(&field.label(), active)),
                area,
            );
        }
        FormField::Images(i) => draw_images_field(frame, area, state, i, active),
        FormField::Submit => draw_submit(frame, area, state, active),
        _ => draw_field_with_value(
            frame,
            area,
            &field.label(),
            &state.field_value(field),
            field.kind(),
            active,
        ),
    }
}

/// Pending path, shown only while the field is focused
fn path_input_line(state: &AppState, active: bool) -> Line<'static> {
    if !active {
        return Line::from("");
    }
    Line::from(vec![
        Span::styled("Path: ", Style::default().fg(Color::DarkGray)),
        Span::raw(state.path_input.clone()),
        Span::styled("▌", Style::default().fg(Color::Cyan)),
    ])
}

fn draw_images_field(frame: &mut Frame, area: Rect, state: &AppState, index: usize, active: bool) {
    let images = state
        .form
        .evidence()
        .get(index)
        .map(|e| e.images.as_slice())
        .unwrap_or_default();

    let mut lines: Vec<Line> = images
        .iter()
        .enumerate()
        .map(|(position, image)| {
            if active && position == state.selected_image {
                Line::from(Span::styled(
                    format!("▸ {}", image.name),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {}", image.name))
            }
        })
        .collect();
    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "(no images)",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines.push(path_input_line(state, active));

    let label = FormField::Images(index).label();
    frame.render_widget(Paragraph::new(lines).block(field_block(&label, active)), area);
}

fn draw_submit(frame: &mut Frame, area: Rect, state: &AppState, active: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(BUTTON_HEIGHT), Constraint::Length(1)])
        .split(area);

    let enabled = !state.form.required_missing();
    render_button(
        frame,
        chunks[0],
        &FormField::Submit.label(),
        active,
        enabled,
        Color::Green,
    );

    if !enabled {
        let hint = Paragraph::new(REQUIRED_FIELDS_HINT).style(Style::default().fg(Color::Yellow));
        frame.render_widget(hint, chunks[1]);
    }
}

/// Shortcuts and a summary of what will be uploaded
fn draw_actions_panel(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(" Actions ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let key = Style::default().fg(Color::Cyan);
    let total_images: usize = state.form.evidence().iter().map(|e| e.images.len()).sum();
    let images_style = if total_images > MAX_IMAGES {
        Style::default().fg(Color::Red)
    } else {
        Style::default()
    };

    let lines = vec![
        Line::from(vec![Span::styled(SUBMIT_SHORTCUT, key), Span::raw(" submit")]),
        Line::from(vec![Span::styled(ADD_ENTRY_SHORTCUT, key), Span::raw(" add evidence")]),
        Line::from(vec![
            Span::styled(REMOVE_ENTRY_SHORTCUT, key),
            Span::raw(" remove evidence"),
        ]),
        Line::from(vec![
            Span::styled(TEMPLATE_SHORTCUT, key),
            Span::raw(" download template"),
        ]),
        Line::from(""),
        Line::from(format!("Evidence entries: {}", state.form.evidence().len())),
        Line::from(Span::styled(
            format!("Images: {total_images}/{MAX_IMAGES}"),
            images_style,
        )),
        Line::from(if state.form.spreadsheet().is_some() {
            Span::styled("Spreadsheet: attached", Style::default().fg(Color::Green))
        } else {
            Span::styled("Spreadsheet: missing", Style::default().fg(Color::Yellow))
        }),
    ];

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everything_fits() {
        assert_eq!(visible_range(&[3, 3, 4], 2, 20), 0..3);
    }

    #[test]
    fn test_scrolls_to_keep_active_visible() {
        let heights = [3, 3, 3, 3, 3];
        let range = visible_range(&heights, 4, 7);
        assert!(range.contains(&4));
        assert_eq!(range, 3..5);
    }

    #[test]
    fn test_oversized_field_still_drawn() {
        assert_eq!(visible_range(&[3, 10], 1, 5), 1..2);
    }

    #[test]
    fn test_images_field_grows_with_images() {
        let mut state = AppState::default();
        assert_eq!(field_height(&state, FormField::Images(0)), 4);
        state.dispatch(crate::state::FormAction::AppendImages {
            index: 0,
            files: vec![
                crate::state::FileRef::from_path("a.png"),
                crate::state::FileRef::from_path("b.png"),
            ],
        });
        assert_eq!(field_height(&state, FormField::Images(0)), 5);
    }
}
