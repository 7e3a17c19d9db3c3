//! Main window: drop zone, file picker, analyze trigger, result card, and notices.

use std::{path::PathBuf, time::Duration};

use client_core::{
    affordances::ResultDisplay, AnalysisError, Affordances, DragEvent, NoticeQueue, Notifier,
    SelectedFile, UploadController,
};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::{
    backend_bridge::commands::BackendCommand,
    controller::{
        events::{UiError, UiErrorContext, UiEvent},
        orchestration::dispatch_backend_command,
    },
    ui::theme,
};

const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "ogg", "flac", "m4a", "webm", "aac"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Enter,
    Over,
    Leave,
}

/// Maps hover state between two frames onto the drag notification to deliver.
pub fn drag_transition(was_hovering: bool, hovering: bool) -> Option<DragPhase> {
    match (was_hovering, hovering) {
        (false, true) => Some(DragPhase::Enter),
        (true, true) => Some(DragPhase::Over),
        (true, false) => Some(DragPhase::Leave),
        (false, false) => None,
    }
}

pub struct ScreeningApp {
    controller: UploadController<NoticeQueue>,
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    backend_status: String,
    backend_error: Option<UiError>,
    drag_hovering: bool,
}

impl ScreeningApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        Self {
            controller: UploadController::new(Affordances::default(), NoticeQueue::default()),
            cmd_tx,
            ui_rx,
            backend_status: "Backend worker starting...".to_string(),
            backend_error: None,
            drag_hovering: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::BackendReady { endpoint } => {
                    self.backend_status = format!("Screening service: {endpoint}");
                }
                UiEvent::AnalysisFinished(outcome) => {
                    self.controller.complete_analysis(outcome);
                }
                UiEvent::Error(err) => {
                    tracing::error!(
                        context = ?err.context(),
                        category = ?err.category(),
                        "{}",
                        err.message()
                    );
                    self.backend_status = err.message().to_string();
                    if self.controller.is_analyzing() {
                        let reason = AnalysisError::Transport(err.message().to_string());
                        self.controller.complete_analysis(Err(reason));
                    }
                    self.backend_error = Some(err);
                }
            }
        }
    }

    fn load_files(&mut self, paths: impl IntoIterator<Item = PathBuf>) -> Vec<SelectedFile> {
        let mut files = Vec::new();
        for path in paths {
            match SelectedFile::from_path(&path) {
                Ok(file) => files.push(file),
                Err(err) => self
                    .controller
                    .notifier_mut()
                    .notify(&format!("Error: could not read '{}': {err}", path.display())),
            }
        }
        files
    }

    fn load_dropped(&mut self, dropped: Vec<egui::DroppedFile>) -> Vec<SelectedFile> {
        let mut files = Vec::new();
        for file in dropped {
            if let Some(bytes) = file.bytes {
                files.push(SelectedFile::new(file.name, bytes.to_vec()));
            } else if let Some(path) = file.path {
                files.extend(self.load_files([path]));
            }
        }
        files
    }

    fn handle_drag_and_drop(&mut self, ctx: &egui::Context) {
        let (hovering, dropped) = ctx.input(|i| {
            (
                !i.raw.hovered_files.is_empty(),
                i.raw.dropped_files.clone(),
            )
        });

        if !dropped.is_empty() {
            self.accept_drop(dropped);
            return;
        }

        let mut event = DragEvent::default();
        match drag_transition(self.drag_hovering, hovering) {
            Some(DragPhase::Enter) => self.controller.on_drag_enter(&mut event),
            Some(DragPhase::Over) => self.controller.on_drag_over(&mut event),
            Some(DragPhase::Leave) => self.controller.on_drag_leave(&mut event),
            None => {}
        }
        self.drag_hovering = hovering;
    }

    /// Drops land in the drop zone only while no notice is waiting; the panel is disabled
    /// until the user acknowledges it.
    fn accept_drop(&mut self, dropped: Vec<egui::DroppedFile>) {
        let files = if self.controller.notifier().is_empty() {
            self.load_dropped(dropped)
        } else {
            tracing::debug!(count = dropped.len(), "ui: drop ignored while a notice is open");
            Vec::new()
        };
        let mut event = DragEvent::new(files);
        self.controller.on_drop(&mut event);
        self.drag_hovering = false;
    }

    fn pick_files(&mut self) {
        if let Some(paths) = rfd::FileDialog::new()
            .add_filter("Audio", AUDIO_EXTENSIONS)
            .pick_files()
        {
            let files = self.load_files(paths);
            self.controller.on_file_changed(files);
        }
    }

    fn start_analysis(&mut self) {
        let Some(request) = self.controller.begin_analysis() else {
            return;
        };
        if let Err(reason) =
            dispatch_backend_command(&self.cmd_tx, BackendCommand::Screen { request })
        {
            self.backend_error = Some(UiError::from_message(UiErrorContext::Dispatch, &reason));
            self.controller
                .complete_analysis(Err(AnalysisError::Transport(reason)));
        }
    }

    fn show_main_panel(&mut self, ctx: &egui::Context) {
        let blocked = !self.controller.notifier().is_empty();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_enabled_ui(!blocked, |ui| {
                ui.heading("Voice Screening");
                ui.add_space(8.0);

                let idle_stroke = ui.visuals().widgets.noninteractive.bg_stroke;
                let stroke =
                    theme::drop_zone_stroke(&self.controller.view().drop_zone.classes, idle_stroke);
                let mut choose_clicked = false;
                egui::Frame::group(ui.style()).stroke(stroke).show(ui, |ui| {
                    ui.set_min_width(ui.available_width());
                    ui.vertical_centered(|ui| {
                        ui.add_space(16.0);
                        ui.label("Drag & drop an audio file here");
                        ui.add_space(4.0);
                        choose_clicked = ui.button("Choose file...").clicked();
                        ui.add_space(16.0);
                    });
                });
                if choose_clicked {
                    self.pick_files();
                }

                ui.label(self.controller.view().status.text.as_str());
                ui.add_space(8.0);

                let trigger = &self.controller.view().trigger;
                let analyze_clicked = ui
                    .add_enabled(trigger.enabled, egui::Button::new(trigger.label.as_str()))
                    .clicked();
                if analyze_clicked {
                    self.start_analysis();
                }

                let result = &self.controller.view().result;
                if result.is_visible() {
                    ui.add_space(12.0);
                    show_result_card(ui, result);
                }
            });
        });
    }

    fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("backend_status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.small(self.backend_status.as_str());
                if let Some(err) = &self.backend_error {
                    ui.small(err.hint());
                }
            });
        });
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(message) = self.controller.notifier().front().map(str::to_string) else {
            return;
        };

        let mut acknowledged = false;
        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                ui.label(message.as_str());
                ui.add_space(8.0);
                acknowledged = ui.button("OK").clicked();
            });
        if acknowledged {
            self.controller.notifier_mut().acknowledge();
        }
    }
}

fn show_result_card(ui: &mut egui::Ui, result: &ResultDisplay) {
    egui::Frame::group(ui.style()).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        egui::Grid::new("result_card").num_columns(2).show(ui, |ui| {
            ui.label("Risk level");
            let color = theme::risk_color(&result.risk_classes, ui.visuals().text_color());
            ui.label(
                egui::RichText::new(result.risk_label.as_str())
                    .color(color)
                    .strong(),
            );
            ui.end_row();

            ui.label("Confidence");
            ui.label(result.confidence.as_str());
            ui.end_row();

            for line in &result.probabilities {
                ui.label("");
                ui.weak(line.as_str());
                ui.end_row();
            }
        });
        if !result.disclaimer.is_empty() {
            ui.add_space(6.0);
            ui.small(result.disclaimer.as_str());
        }
    });
}

impl eframe::App for ScreeningApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.handle_drag_and_drop(ctx);

        self.show_status_bar(ctx);
        self.show_main_panel(ctx);
        self.show_notice(ctx);

        if self.controller.is_analyzing() || self.drag_hovering {
            ctx.request_repaint_after(Duration::from_millis(50));
        } else {
            ctx.request_repaint_after(Duration::from_millis(250));
        }
    }
}
