//! Panels for the two views plus the JSON export window, the error banner
//! and the notification toast. Panels never mutate the session beyond form
//! text edits; everything else comes back as a [`PanelAction`].

use client_core::{DeckSession, View};
use eframe::egui;
use shared::domain::{FormField, SectionKey};

use crate::ui::{markdown, theme};

const EMPTY_SLIDE_PLACEHOLDER: &str = "No content generated for this section yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Submit,
    Regenerate(SectionKey),
    OpenJson,
    CopyJson,
    SaveJson,
    CloseJson,
    Download,
    Reset,
    DismissNotification,
}

/// What a review card shows for one section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardState<'a> {
    pub content: Option<&'a str>,
    pub regenerating: bool,
    pub can_regenerate: bool,
}

pub fn card_state(session: &DeckSession, section: SectionKey) -> CardState<'_> {
    let content = session
        .deck()
        .map(|deck| deck.get(section))
        .filter(|text| !text.trim().is_empty());
    let running = session.regenerating();
    CardState {
        content,
        regenerating: running == Some(section),
        can_regenerate: running.is_none() && session.deck().is_some(),
    }
}

pub fn field_label(field: FormField) -> String {
    if field.is_required() {
        format!("{} *", field.label())
    } else {
        field.label().to_string()
    }
}

pub fn central(ui: &mut egui::Ui, session: &mut DeckSession) -> Option<PanelAction> {
    match session.view() {
        View::Input => input_form(ui, session),
        View::Review => review(ui, session),
    }
}

fn input_form(ui: &mut egui::Ui, session: &mut DeckSession) -> Option<PanelAction> {
    let mut action = None;
    let generating = session.is_generating();

    ui.heading("Tell us about your startup");
    ui.label(
        egui::RichText::new("Fields marked * are required.")
            .small()
            .color(theme::REQUIRED_MARKER),
    );
    ui.add_space(8.0);

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.add_enabled_ui(!generating, |ui| {
                for field in FormField::ALL {
                    ui.label(egui::RichText::new(field_label(field)).strong());
                    let value = session.field_mut(field);
                    let edit = match field.multiline_rows() {
                        Some(rows) => egui::TextEdit::multiline(value).desired_rows(rows),
                        None => egui::TextEdit::singleline(value),
                    };
                    ui.add(edit.desired_width(f32::INFINITY));
                    ui.add_space(6.0);
                }
            });

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let button = egui::Button::new("Generate Pitch Deck").fill(theme::ACCENT);
                if ui.add_enabled(!generating, button).clicked() {
                    action = Some(PanelAction::Submit);
                }
                if generating {
                    ui.spinner();
                    ui.label("Generating your pitch deck...");
                }
            });
        });

    action
}

fn review(ui: &mut egui::Ui, session: &DeckSession) -> Option<PanelAction> {
    let mut action = None;

    ui.horizontal(|ui| {
        if ui.button("Export JSON").clicked() {
            action = Some(PanelAction::OpenJson);
        }
        let downloading = session.is_downloading();
        if ui
            .add_enabled(!downloading, egui::Button::new("Download PowerPoint"))
            .clicked()
        {
            action = Some(PanelAction::Download);
        }
        if downloading {
            ui.spinner();
        }
        if ui.button("Back to Input Form").clicked() {
            action = Some(PanelAction::Reset);
        }
    });
    ui.separator();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for section in SectionKey::ALL {
                if let Some(card_action) = slide_card(ui, session, section) {
                    action = Some(card_action);
                }
                ui.add_space(10.0);
            }
        });

    action
}

fn slide_card(ui: &mut egui::Ui, session: &DeckSession, section: SectionKey) -> Option<PanelAction> {
    let card = card_state(session, section);
    let mut action = None;

    egui::Frame::NONE
        .fill(ui.visuals().faint_bg_color)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(14, 12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(section.label()).strong().size(16.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let button = egui::Button::new("Regenerate");
                    if ui.add_enabled(card.can_regenerate, button).clicked() {
                        action = Some(PanelAction::Regenerate(section));
                    }
                    if card.regenerating {
                        ui.spinner();
                    }
                });
            });
            ui.add_space(4.0);
            match card.content {
                Some(text) => markdown::show(ui, text),
                None => {
                    ui.label(egui::RichText::new(EMPTY_SLIDE_PLACEHOLDER).italics().weak());
                }
            }
        });

    action
}

pub fn json_window(ctx: &egui::Context, session: &DeckSession) -> Option<PanelAction> {
    if !session.is_json_dialog_open() {
        return None;
    }
    let Some(json) = session.export_json() else {
        return Some(PanelAction::CloseJson);
    };

    let mut action = None;
    let mut keep_open = true;
    egui::Window::new("Pitch Deck JSON")
        .open(&mut keep_open)
        .resizable(true)
        .default_size([560.0, 480.0])
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("Copy to Clipboard").clicked() {
                    action = Some(PanelAction::CopyJson);
                }
                if ui.button("Save as File").clicked() {
                    action = Some(PanelAction::SaveJson);
                }
                if ui.button("Close").clicked() {
                    action = Some(PanelAction::CloseJson);
                }
            });
            ui.separator();
            egui::ScrollArea::both().show(ui, |ui| {
                let mut text = json.as_str();
                ui.add(
                    egui::TextEdit::multiline(&mut text)
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });
        });

    if !keep_open {
        action = Some(PanelAction::CloseJson);
    }
    action
}

pub fn error_banner(ui: &mut egui::Ui, session: &DeckSession) {
    let Some(message) = session.error_banner() else {
        return;
    };
    let (fill, stroke) = theme::severity_colors(client_core::Severity::Error);
    egui::Frame::NONE
        .fill(fill)
        .stroke(stroke)
        .corner_radius(8.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(message).color(egui::Color32::WHITE));
        });
    ui.add_space(6.0);
}

pub fn notification_toast(ctx: &egui::Context, session: &DeckSession) -> Option<PanelAction> {
    let notification = session.notification()?;
    let (fill, stroke) = theme::severity_colors(notification.severity);
    let mut action = None;

    egui::Area::new(egui::Id::new("notification_toast"))
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -24.0])
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            egui::Frame::NONE
                .fill(fill)
                .stroke(stroke)
                .corner_radius(8.0)
                .inner_margin(egui::Margin::symmetric(12, 10))
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "{} {}",
                                theme::severity_icon(notification.severity),
                                notification.message
                            ))
                            .color(egui::Color32::WHITE),
                        );
                        if ui.small_button("✕").clicked() {
                            action = Some(PanelAction::DismissNotification);
                        }
                    });
                });
        });

    action
}

#[cfg(test)]
#[path = "../tests/panels_tests.rs"]
mod tests;
