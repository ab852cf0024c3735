//! Application state definitions

use super::{
    cycle_choice, focus_order, EvidenceField, EvidenceForm, FieldKind, FileRef,
    FormAction, FormField,
};
use std::collections::VecDeque;

/// Everything the terminal client shows, around the evidence form itself
#[derive(Debug, Default)]
pub struct AppState {
    /// The form session
    pub form: EvidenceForm,
    /// Index into [`focus_order`] of the focused field
    pub active_form_field: usize,
    /// Path being typed for the spreadsheet or images field
    pub path_input: String,
    /// Selected image in the focused images field
    pub selected_image: usize,
    /// Whether `/health` answered at startup
    pub server_connected: bool,
    /// Pending error messages, shown one at a time
    pub errors: VecDeque<String>,
    /// Success notification shown as a dialog
    pub notice: Option<String>,
    /// One-line message in the status bar
    pub status_message: Option<String>,
}

impl AppState {
    /// Apply an action to the form and keep focus in range
    pub fn dispatch(&mut self, action: FormAction) {
        let form = std::mem::take(&mut self.form);
        self.form = form.reduce(action);
        self.clamp_focus();
    }

    pub fn fields(&self) -> Vec<FormField> {
        focus_order(self.form.evidence().len())
    }

    pub fn focused_field(&self) -> FormField {
        let fields = self.fields();
        fields
            .get(self.active_form_field)
            .copied()
            .unwrap_or(FormField::Submit)
    }

    /// Move to next form field
    pub fn next_form_field(&mut self) {
        let count = self.fields().len();
        self.active_form_field = (self.active_form_field + 1) % count;
        self.on_focus_change();
    }

    /// Move to previous form field
    pub fn prev_form_field(&mut self) {
        let count = self.fields().len();
        if self.active_form_field == 0 {
            self.active_form_field = count - 1;
        } else {
            self.active_form_field -= 1;
        }
        self.on_focus_change();
    }

    /// Focus a specific field if it exists
    pub fn focus(&mut self, field: FormField) {
        if let Some(pos) = self.fields().iter().position(|f| *f == field) {
            self.active_form_field = pos;
            self.on_focus_change();
        }
    }

    fn on_focus_change(&mut self) {
        self.path_input.clear();
        self.selected_image = 0;
    }

    fn clamp_focus(&mut self) {
        let count = self.fields().len();
        if self.active_form_field >= count {
            self.active_form_field = count - 1;
        }
        if let FormField::Images(i) = self.focused_field() {
            let images = self.form.evidence()[i].images.len();
            self.selected_image = self.selected_image.min(images.saturating_sub(1));
        }
    }

    /// Current text of a text or choice field
    pub fn field_value(&self, field: FormField) -> String {
        match field {
            FormField::Application(f) => self.form.application().get(f).to_string(),
            FormField::Evidence(i, f) => self
                .form
                .evidence()
                .get(i)
                .map(|e| e.get(f).to_string())
                .unwrap_or_default(),
            FormField::Spreadsheet => self
                .form
                .spreadsheet()
                .map(|s| s.name.clone())
                .unwrap_or_default(),
            FormField::Images(_) | FormField::Submit => String::new(),
        }
    }

    fn set_field_value(&mut self, field: FormField, value: String) {
        match field {
            FormField::Application(f) => self.dispatch(FormAction::SetApplicationField(f, value)),
            FormField::Evidence(index, f) => self.dispatch(FormAction::UpdateEvidenceField {
                index,
                field: f,
                value,
            }),
            _ => {}
        }
    }

    /// Handle character input in the focused field
    pub fn form_input_char(&mut self, c: char) {
        let field = self.focused_field();
        match field.kind() {
            FieldKind::Text => {
                let mut value = self.field_value(field);
                value.push(c);
                self.set_field_value(field, value);
            }
            FieldKind::FilePath => self.path_input.push(c),
            FieldKind::Choice(_) | FieldKind::Button => {}
        }
    }

    /// Handle backspace in the focused field
    pub fn form_backspace(&mut self) {
        let field = self.focused_field();
        match field.kind() {
            FieldKind::Text => {
                let mut value = self.field_value(field);
                value.pop();
                self.set_field_value(field, value);
            }
            FieldKind::FilePath => {
                self.path_input.pop();
            }
            FieldKind::Choice(_) | FieldKind::Button => {}
        }
    }

    /// Cycle a choice field, or move the image selection
    pub fn form_cycle(&mut self, forward: bool) {
        let field = self.focused_field();
        match (field, field.kind()) {
            (_, FieldKind::Choice(options)) => {
                let value = cycle_choice(options, &self.field_value(field), forward);
                self.set_field_value(field, value);
            }
            (FormField::Images(i), _) => {
                let count = self.form.evidence()[i].images.len();
                if count == 0 {
                    return;
                }
                self.selected_image = if forward {
                    (self.selected_image + 1) % count
                } else if self.selected_image == 0 {
                    count - 1
                } else {
                    self.selected_image - 1
                };
            }
            _ => {}
        }
    }

    /// Attach a file to the focused spreadsheet or images field
    pub fn attach_file(&mut self, file: FileRef) {
        match self.focused_field() {
            FormField::Spreadsheet => self.dispatch(FormAction::SetSpreadsheet(Some(file))),
            FormField::Images(index) => self.dispatch(FormAction::AppendImages {
                index,
                files: vec![file],
            }),
            _ => return,
        }
        self.path_input.clear();
    }

    /// Clear the spreadsheet or remove the selected image
    pub fn remove_focused_file(&mut self) {
        match self.focused_field() {
            FormField::Spreadsheet => self.dispatch(FormAction::SetSpreadsheet(None)),
            FormField::Images(index) => self.dispatch(FormAction::RemoveImage {
                index,
                position: self.selected_image,
            }),
            _ => {}
        }
    }

    /// Remove the evidence entry owning the focused field
    pub fn remove_focused_entry(&mut self) {
        if let Some(index) = self.focused_field().evidence_index() {
            self.dispatch(FormAction::RemoveEvidenceEntry(index));
        }
    }

    /// Append a blank entry and focus its category
    pub fn add_entry(&mut self) {
        self.dispatch(FormAction::AddEvidenceEntry);
        let last = self.form.evidence().len() - 1;
        self.focus(FormField::Evidence(last, EvidenceField::Category));
    }

    /// Start a fresh session
    pub fn reset_form(&mut self) {
        self.dispatch(FormAction::Reset);
        self.active_form_field = 0;
        self.on_focus_change();
    }

    pub fn push_error(&mut self, message: String) {
        self.errors.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.errors.pop_front();
    }
}

#[cfg(test)]
impl AppState {
    /// Application name is focused initially
    pub fn is_initial_focus(&self) -> bool {
        self.focused_field() == FormField::Application(super::ApplicationField::Name)
    }
}
