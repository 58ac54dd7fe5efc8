//! Colors and visuals for the desktop app.

use client_core::Severity;
use eframe::egui;

pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(88, 101, 242);
pub const REQUIRED_MARKER: egui::Color32 = egui::Color32::from_rgb(237, 66, 69);

pub fn apply(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(egui::Color32::from_rgb(220, 221, 222));
    visuals.window_fill = egui::Color32::from_rgb(40, 44, 52);
    visuals.panel_fill = egui::Color32::from_rgb(33, 37, 43);
    visuals.extreme_bg_color = egui::Color32::from_rgb(24, 26, 31);
    visuals.faint_bg_color = egui::Color32::from_rgb(52, 57, 66);
    visuals.hyperlink_color = ACCENT;
    visuals.selection.bg_fill = ACCENT;
    visuals.widgets.active.bg_fill = ACCENT;
    visuals.widgets.hovered.bg_fill = ACCENT.gamma_multiply(0.85);
    visuals.window_corner_radius = egui::CornerRadius::same(10);
    visuals.menu_corner_radius = egui::CornerRadius::same(8);
    ctx.set_visuals(visuals);
}

/// Fill and stroke for a notification toast.
pub fn severity_colors(severity: Severity) -> (egui::Color32, egui::Stroke) {
    let (fill, stroke) = match severity {
        Severity::Info => (
            egui::Color32::from_rgb(45, 62, 92),
            egui::Color32::from_rgb(96, 130, 190),
        ),
        Severity::Success => (
            egui::Color32::from_rgb(38, 84, 58),
            egui::Color32::from_rgb(87, 170, 118),
        ),
        Severity::Warning => (
            egui::Color32::from_rgb(99, 80, 35),
            egui::Color32::from_rgb(196, 160, 72),
        ),
        Severity::Error => (
            egui::Color32::from_rgb(111, 53, 53),
            egui::Color32::from_rgb(175, 96, 96),
        ),
    };
    (fill, egui::Stroke::new(1.0, stroke))
}

pub fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "ℹ",
        Severity::Success => "✔",
        Severity::Warning => "⚠",
        Severity::Error => "✖",
    }
}
