// src/core/panel.rs
//! Upload panel view model
//!
//! Holds everything the upload page shows: the selected file, the status
//! line, whether the extract trigger is enabled, the result cards and the
//! JSON output. Both the web page and the CLI drive it.
//!
//! idle -> file-selected -> uploading -> (done | failed) -> file-selected

use crate::app_log;
use crate::core::intake::{self, IntakeError, SelectedFile};
use crate::core::render::{render_result, Card, RenderedResult};
use crate::core::service_client::{ExtractionError, ExtractionService};
use crate::types::ExtractionResult;

pub const STATUS_UPLOADING: &str = "Uploading & extracting...";
pub const STATUS_DONE: &str = "Done ✅";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Idle,
    FileSelected,
    Uploading,
    Done,
    Failed,
}

#[derive(Debug, Clone)]
pub struct UploadPanel {
    state: PanelState,
    selected: Option<SelectedFile>,
    selected_label: String,
    status: String,
    trigger_enabled: bool,
    rendered: RenderedResult,
    alert: Option<String>,
}

impl Default for UploadPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadPanel {
    pub fn new() -> Self {
        Self {
            state: PanelState::Idle,
            selected: None,
            selected_label: String::new(),
            status: String::new(),
            trigger_enabled: false,
            rendered: RenderedResult::default(),
            alert: None,
        }
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    pub fn selected_label(&self) -> &str {
        &self.selected_label
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled
    }

    pub fn cards(&self) -> &[Card] {
        &self.rendered.cards
    }

    pub fn json_output(&self) -> &str {
        &self.rendered.json
    }

    /// The last rejection message, if the last pick was rejected.
    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    /// Show a message without touching the selection, e.g. when an upload could not be read.
    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.alert = Some(message.into());
    }

    /// Pick a file through the file picker.
    ///
    /// A rejected file leaves the current selection and results untouched.
    pub fn select(&mut self, file: SelectedFile) -> Result<(), IntakeError> {
        let file = match intake::accept(file) {
            Ok(file) => file,
            Err(e) => {
                self.alert = Some(e.alert());
                return Err(e);
            }
        };

        self.alert = None;
        self.selected_label = file.label();
        self.selected = Some(file);
        self.status.clear();
        self.clear_results();

        // A request already in flight keeps the trigger disabled until it settles.
        if self.state != PanelState::Uploading {
            self.trigger_enabled = true;
            self.state = PanelState::FileSelected;
        }
        Ok(())
    }

    /// Drop files on the drop zone; only the first one is considered.
    pub fn drop_files<I>(&mut self, files: I) -> Option<Result<(), IntakeError>>
    where
        I: IntoIterator<Item = SelectedFile>,
    {
        intake::first_dropped(files).map(|file| self.select(file))
    }

    /// Start a request: disables the trigger and hands back the file to upload.
    ///
    /// Returns `None` when there is nothing to send or the trigger is disabled.
    pub fn begin_submit(&mut self) -> Option<SelectedFile> {
        if !self.trigger_enabled {
            return None;
        }
        let file = self.selected.clone()?;

        self.trigger_enabled = false;
        self.status = STATUS_UPLOADING.to_string();
        self.clear_results();
        self.state = PanelState::Uploading;
        Some(file)
    }

    /// Settle a request started with [`begin_submit`](Self::begin_submit).
    pub fn complete_submit(&mut self, outcome: Result<ExtractionResult, ExtractionError>) {
        match outcome {
            Ok(result) => {
                self.rendered = render_result(&result);
                self.status = STATUS_DONE.to_string();
                self.state = PanelState::Done;
            }
            Err(e) => {
                app_log!(error, "Extraction failed ({}): {}", e.code(), e);
                self.status = format!("Error: {}", e);
                self.state = PanelState::Failed;
            }
        }
        self.trigger_enabled = true;
    }

    /// Press the trigger and wait for the service.
    pub async fn submit<S>(&mut self, service: &S) -> PanelState
    where
        S: ExtractionService + ?Sized,
    {
        let Some(file) = self.begin_submit() else {
            return self.state;
        };

        let outcome = service.extract_pdf(&file).await;
        self.complete_submit(outcome);
        self.state
    }

    fn clear_results(&mut self) {
        self.rendered = RenderedResult::default();
    }
}
