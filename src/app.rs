//! Application state and core logic

use crate::client::EvidenceApi;
use crate::platform::is_shortcut;
use crate::state::{AppState, FieldKind, FileRef, FormField};
use crate::submit::SubmissionOrchestrator;
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// File name the spreadsheet template is saved under
pub const TEMPLATE_FILE_NAME: &str = "evidence_template.csv";

/// Shown under a disabled submit button
pub const REQUIRED_FIELDS_HINT: &str = "Please fill in all required fields to submit the form";

pub const SUBMIT_FAILED: &str = "Submission failed.";
pub const TEMPLATE_FAILED: &str = "Failed to download template.";
pub const SUBMIT_SUCCEEDED: &str = "Evidence submitted successfully.";

/// Fetch the spreadsheet template and write it to `path`
pub async fn save_template<A: EvidenceApi + ?Sized>(api: &A, path: &Path) -> Result<()> {
    let csv = api.download_template().await?;
    tokio::fs::write(path, csv)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

/// Main application struct
pub struct App<A: EvidenceApi> {
    /// Current application state
    pub state: AppState,
    /// Backend client
    pub api: A,
    /// Where downloaded templates are written
    template_dir: PathBuf,
    /// Whether the app should quit
    quit: bool,
}

impl<A: EvidenceApi> App<A> {
    /// Create a new App instance
    pub async fn new(api: A, template_dir: PathBuf) -> Self {
        let mut state = AppState::default();

        state.server_connected = match api.health().await {
            Ok(ok) => ok,
            Err(e) => {
                warn!("Backend health check failed: {e:#}");
                false
            }
        };

        Self {
            state,
            api,
            template_dir,
            quit: false,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Dialogs are modal
        if self.state.notice.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.notice = None;
            }
            return Ok(());
        }
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        self.state.status_message = None;

        if is_shortcut(key.modifiers) {
            match key.code {
                KeyCode::Char('s') => self.submit().await,
                KeyCode::Char('n') => self.state.add_entry(),
                KeyCode::Char('d') => self.state.remove_focused_entry(),
                KeyCode::Char('t') => self.download_template().await,
                _ => {}
            }
            return Ok(());
        }

        let field = self.state.focused_field();
        match key.code {
            KeyCode::Esc => self.quit = true,
            KeyCode::Tab | KeyCode::Down => self.state.next_form_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.prev_form_field(),
            KeyCode::Left => self.state.form_cycle(false),
            KeyCode::Right => self.state.form_cycle(true),
            KeyCode::Enter if field == FormField::Submit => self.submit().await,
            KeyCode::Enter if field.kind() == FieldKind::FilePath => self.attach_typed_path(),
            KeyCode::Enter => self.state.next_form_field(),
            KeyCode::Delete => self.state.remove_focused_file(),
            KeyCode::Backspace => self.state.form_backspace(),
            KeyCode::Char(c) => self.state.form_input_char(c),
            _ => {}
        }
        Ok(())
    }

    /// Attach the path typed into the focused file field
    fn attach_typed_path(&mut self) {
        let input = self.state.path_input.trim();
        if input.is_empty() {
            return;
        }

        let path = PathBuf::from(input);
        if !path.is_file() {
            self.state
                .push_error(format!("File not found: {}", path.display()));
            return;
        }

        let file = FileRef::from_path(path);
        self.state.status_message = Some(format!("Attached {}", file.name));
        self.state.attach_file(file);
    }

    /// Run the submission workflow if the form is complete
    pub async fn submit(&mut self) {
        if self.state.form.required_missing() {
            self.state.status_message = Some(REQUIRED_FIELDS_HINT.to_string());
            return;
        }

        let result = SubmissionOrchestrator::new(&self.api)
            .submit(&self.state.form)
            .await;

        match result {
            Ok(receipt) => {
                info!(id = %receipt.id, "Submission complete");
                self.state.reset_form();
                self.state.notice = Some(SUBMIT_SUCCEEDED.to_string());
                self.state.status_message = Some(format!("Submission {} accepted", receipt.id));
            }
            Err(e) => {
                warn!("{e}");
                self.state.push_error(SUBMIT_FAILED.to_string());
            }
        }
    }

    /// Save the spreadsheet template into the configured directory
    pub async fn download_template(&mut self) {
        let path = self.template_dir.join(TEMPLATE_FILE_NAME);
        match save_template(&self.api, &path).await {
            Ok(()) => {
                info!("Template saved to {}", path.display());
                self.state.status_message = Some(format!("Template saved to {}", path.display()));
            }
            Err(e) => {
                warn!("{e:#}");
                self.state.push_error(TEMPLATE_FAILED.to_string());
            }
        }
    }
}
