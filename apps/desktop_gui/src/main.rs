mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::Context;
use clap::Parser;
use crossbeam_channel::bounded;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use crate::backend_bridge::{
    commands::BackendCommand,
    runtime::{self, BackendSettings},
};
use crate::config::{load_settings, CliArgs};
use crate::controller::events::UiEvent;
use crate::ui::DeckStudioApp;

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let settings = load_settings(&args)?;

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt().with_env_filter(filter).init();
    tracing::info!(
        api = %settings.api_base_url,
        timeout_secs = settings.request_timeout_secs,
        "starting pitch deck studio"
    );

    let (cmd_tx, cmd_rx) = bounded::<BackendCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    runtime::launch(
        cmd_rx,
        ui_tx,
        BackendSettings {
            api_base_url: settings.api_base_url.clone(),
            request_timeout: settings.request_timeout(),
        },
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Pitch Deck Studio")
            .with_inner_size([1100.0, 820.0])
            .with_min_inner_size([720.0, 560.0]),
        ..Default::default()
    };
    let app = DeckStudioApp::new(
        cmd_tx,
        ui_rx,
        settings.api_base_url.clone(),
        settings.notification_ttl(),
    );
    eframe::run_native(
        "Pitch Deck Studio",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
    .map_err(|err| anyhow::anyhow!("failed to run desktop app: {err}"))
}
