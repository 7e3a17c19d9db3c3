//! Upload controller: file selection, drag-and-drop, and the analyze round trip.

use std::collections::VecDeque;

use shared::protocol::AnalysisResult;
use tracing::{debug, info, warn};

use crate::{
    affordances::{
        Affordances, DragEvent, SelectedFile, ANALYZE_LABEL, ANALYZING_LABEL, DRAG_CLASS,
        HIDDEN_CLASS, RISK_LABEL_BASE_CLASS,
    },
    error::AnalysisError,
    AnalysisRequest, ScreeningService,
};

pub const NO_FILE_NOTICE: &str = "Please select an audio file first.";
pub const SELECTED_FILE_PREFIX: &str = "Selected file: ";

/// Surfaces blocking, user-facing notices.
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Notices waiting to be acknowledged, oldest first.
#[derive(Debug, Default, Clone)]
pub struct NoticeQueue {
    pending: VecDeque<String>,
}

impl NoticeQueue {
    pub fn front(&self) -> Option<&str> {
        self.pending.front().map(String::as_str)
    }

    pub fn acknowledge(&mut self) -> Option<String> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl Notifier for NoticeQueue {
    fn notify(&mut self, message: &str) {
        self.pending.push_back(message.to_string());
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiState {
    Idle,
    Analyzing,
    Shown(AnalysisResult),
    Failed,
}

pub struct UploadController<N: Notifier> {
    view: Affordances,
    state: UiState,
    notifier: N,
}

impl<N: Notifier> UploadController<N> {
    pub fn new(view: Affordances, notifier: N) -> Self {
        Self {
            view,
            state: UiState::Idle,
            notifier,
        }
    }

    pub fn view(&self) -> &Affordances {
        &self.view
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn is_analyzing(&self) -> bool {
        self.state == UiState::Analyzing
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    /// Replaces the active selection and mirrors its first entry in the status text.
    pub fn on_file_changed(&mut self, selection: Vec<SelectedFile>) {
        if selection.len() > 1 {
            debug!(
                ignored = selection.len() - 1,
                "upload: only the first selected file is used"
            );
        }
        self.view.status.text = match selection.first() {
            Some(file) => format!("{SELECTED_FILE_PREFIX}{}", file.name),
            None => String::new(),
        };
        self.view.file_picker.set_files(selection);
    }

    pub fn on_drag_enter(&mut self, event: &mut DragEvent) {
        self.activate_drop_zone(event);
    }

    pub fn on_drag_over(&mut self, event: &mut DragEvent) {
        self.activate_drop_zone(event);
    }

    pub fn on_drag_leave(&mut self, event: &mut DragEvent) {
        self.deactivate_drop_zone(event);
    }

    /// A drop with files behaves exactly like a picker change, status text included.
    pub fn on_drop(&mut self, event: &mut DragEvent) {
        self.deactivate_drop_zone(event);
        if event.files.is_empty() {
            return;
        }
        let files = std::mem::take(&mut event.files);
        self.on_file_changed(files);
    }

    /// Validates the selection and enters `Analyzing`.
    ///
    /// Returns `None` when there is nothing to submit: no file selected (the user is
    /// notified) or an analysis already in flight.
    pub fn begin_analysis(&mut self) -> Option<AnalysisRequest> {
        if !self.view.trigger.enabled {
            debug!("upload: analyze ignored while a request is in flight");
            return None;
        }
        let Some(file) = self.view.file_picker.first().cloned() else {
            self.notifier.notify(NO_FILE_NOTICE);
            return None;
        };

        self.state = UiState::Analyzing;
        self.view.trigger.enabled = false;
        self.view.trigger.label = ANALYZING_LABEL.to_string();
        info!(filename = %file.name, size = file.bytes.len(), "upload: analysis started");
        Some(AnalysisRequest::new(file))
    }

    /// Renders the outcome of a request started by [`Self::begin_analysis`], then restores
    /// the trigger whatever the outcome was.
    pub fn complete_analysis(&mut self, outcome: Result<AnalysisResult, AnalysisError>) {
        match outcome {
            Ok(result) => {
                self.render_result(&result);
                info!(
                    risk = ?result.risk(),
                    confidence = result.confidence,
                    "upload: analysis finished"
                );
                self.state = UiState::Shown(result);
            }
            Err(err) => {
                warn!("upload: analysis failed: {err}");
                self.notifier.notify(&err.notice());
                self.state = UiState::Failed;
            }
        }

        self.view.trigger.enabled = true;
        self.view.trigger.label = ANALYZE_LABEL.to_string();
    }

    pub async fn on_analyze_clicked<S>(&mut self, service: &S)
    where
        S: ScreeningService + ?Sized,
    {
        let Some(request) = self.begin_analysis() else {
            return;
        };
        let outcome = service.screen(request).await;
        self.complete_analysis(outcome);
    }

    fn activate_drop_zone(&mut self, event: &mut DragEvent) {
        event.prevent_default();
        self.view.drop_zone.classes.add(DRAG_CLASS);
    }

    fn deactivate_drop_zone(&mut self, event: &mut DragEvent) {
        event.prevent_default();
        self.view.drop_zone.classes.remove(DRAG_CLASS);
    }

    fn render_result(&mut self, result: &AnalysisResult) {
        let display = &mut self.view.result;
        display.card_classes.remove(HIDDEN_CLASS);
        display.confidence = result.confidence_text();
        display.disclaimer = result.disclaimer_text().to_string();
        display.probabilities = result.probability_lines();

        let risk = result.risk();
        display.risk_classes.reset(RISK_LABEL_BASE_CLASS);
        display.risk_label = risk.label().to_string();
        if let Some(class) = risk.style_class() {
            display.risk_classes.add(class);
        }
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
