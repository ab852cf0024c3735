//! UI module for rendering the TUI

mod components;
mod forms;
mod layout;

use crate::app::App;
use crate::client::EvidenceApi;
use components::{render_error_dialog, render_notice_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw<A: EvidenceApi>(frame: &mut Frame, app: &App<A>) {
    let (header_area, main_area, status_area) = layout::create_layout(frame.area());

    layout::draw_header(frame, header_area, app);
    forms::draw_evidence_form(frame, main_area, app);
    layout::draw_status_bar(frame, status_area, app);

    // Dialogs draw last so they overlay the form
    if let Some(notice) = &app.state.notice {
        render_notice_dialog(frame, notice);
    } else if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error, app.state.errors.len());
    }
}
