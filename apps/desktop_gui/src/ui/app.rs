use std::time::{Duration, Instant};

use arboard::Clipboard;
use client_core::{DeckSession, ExportFile, SaveOutcome};
use crossbeam_channel::{Receiver, Sender};
use eframe::egui;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::{dispatch_backend_command, dispatch_request};
use crate::ui::panels::{self, PanelAction};
use crate::ui::theme;

pub struct DeckStudioApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    session: DeckSession,
    service_url: String,
    backend_status: String,
    theme_applied: bool,
}

impl DeckStudioApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        service_url: String,
        notification_ttl: Duration,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            session: DeckSession::with_notification_ttl(notification_ttl),
            service_url,
            backend_status: "Backend worker starting...".to_string(),
            theme_applied: false,
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    tracing::info!("{message}");
                    self.backend_status = message;
                }
                UiEvent::Error(err) => {
                    tracing::error!(
                        context = ?err.context(),
                        category = ?err.category(),
                        "{}",
                        err.message()
                    );
                    self.backend_status = err.display_message();
                    self.session.report_error(err.display_message());
                }
                UiEvent::Deck(response) => {
                    if let Some(file) = self.session.apply(response) {
                        self.queue_save(file);
                    }
                }
                UiEvent::FileSaved(outcome) => self.session.record_file_saved(outcome),
            }
        }
    }

    fn queue_save(&mut self, file: ExportFile) {
        let kind = file.kind;
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, BackendCommand::SaveFile(file)) {
            self.session.record_file_saved(SaveOutcome::Failed {
                kind,
                reason: err.error.message().to_string(),
            });
        }
    }

    fn handle_action(&mut self, action: PanelAction) {
        tracing::debug!(?action, "panel action");
        match action {
            PanelAction::Submit => {
                if let Some(request) = self.session.submit() {
                    dispatch_request(&self.cmd_tx, request, &mut self.session);
                }
            }
            PanelAction::Regenerate(section) => {
                if let Some(request) = self.session.begin_regenerate(section) {
                    dispatch_request(&self.cmd_tx, request, &mut self.session);
                }
            }
            PanelAction::Download => {
                if let Some(request) = self.session.begin_download() {
                    dispatch_request(&self.cmd_tx, request, &mut self.session);
                }
            }
            PanelAction::OpenJson => self.session.open_json_export(),
            PanelAction::CloseJson => self.session.close_json_export(),
            PanelAction::CopyJson => {
                if let Some(json) = self.session.export_json() {
                    let result = copy_text_to_clipboard(json);
                    self.session.record_clipboard_copy(result);
                }
            }
            PanelAction::SaveJson => {
                if let Some(file) = self.session.json_export_file() {
                    self.queue_save(file);
                }
            }
            PanelAction::Reset => self.session.reset(),
            PanelAction::DismissNotification => self.session.dismiss_notification(),
        }
    }

    fn apply_theme_if_needed(&mut self, ctx: &egui::Context) {
        if !self.theme_applied {
            theme::apply(ctx);
            self.theme_applied = true;
        }
    }
}

fn copy_text_to_clipboard(text: String) -> Result<(), String> {
    let mut clipboard = Clipboard::new().map_err(|err| err.to_string())?;
    clipboard.set_text(text).map_err(|err| err.to_string())
}

impl eframe::App for DeckStudioApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();
        self.session.expire_notification(Instant::now());
        self.apply_theme_if_needed(ctx);

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("header").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.heading("AI Pitch Deck Generator");
            ui.label(
                egui::RichText::new("Turn your startup idea into a ten-slide investor deck.")
                    .weak(),
            );
            ui.add_space(6.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&self.backend_status).small().weak());
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(&self.service_url).small().weak());
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            panels::error_banner(ui, &self.session);
            actions.extend(panels::central(ui, &mut self.session));
        });

        actions.extend(panels::json_window(ctx, &self.session));
        actions.extend(panels::notification_toast(ctx, &self.session));

        for action in actions {
            self.handle_action(action);
        }

        ctx.request_repaint_after(Duration::from_millis(100));
    }
}
