//! Runtime bridge between UI command queue and backend event intake.

use std::{path::PathBuf, sync::Arc, thread, time::Duration};

use client_core::{DeckService, ExportFile, ExportKind, HttpDeckService, SaveOutcome};
use crossbeam_channel::{Receiver, Sender};
use shared::protocol::PRESENTATION_EXTENSION;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub api_base_url: String,
    pub request_timeout: Option<Duration>,
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: BackendSettings) {
    thread::spawn(move || {
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker starting...".to_string()));
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                    UiErrorContext::BackendStartup,
                    format!("backend worker startup failure: failed to build runtime: {err}"),
                )));
                tracing::error!("failed to build backend runtime: {err}");
                return;
            }
        };

        let service: Arc<dyn DeckService> =
            match HttpDeckService::with_timeout(&settings.api_base_url, settings.request_timeout) {
                Ok(service) => Arc::new(service),
                Err(err) => {
                    let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                        UiErrorContext::BackendStartup,
                        format!("backend worker startup failure: {err}"),
                    )));
                    tracing::error!("failed to build deck service client: {err}");
                    return;
                }
            };

        tracing::info!(api = %settings.api_base_url, "backend worker ready");
        let _ = ui_tx.try_send(UiEvent::Info("Backend worker ready".to_string()));

        runtime.block_on(async move {
            while let Ok(cmd) = cmd_rx.recv() {
                let service = Arc::clone(&service);
                let ui_tx = ui_tx.clone();
                tokio::spawn(async move {
                    handle_command(service.as_ref(), cmd, &ui_tx).await;
                });
            }
            tracing::info!("ui command channel closed; backend worker exiting");
        });
    });
}

async fn handle_command(service: &dyn DeckService, cmd: BackendCommand, ui_tx: &Sender<UiEvent>) {
    let event = match cmd {
        BackendCommand::Execute(request) => {
            UiEvent::Deck(client_core::execute(service, request).await)
        }
        BackendCommand::SaveFile(file) => UiEvent::FileSaved(save_file(file).await),
    };
    // Results must not be dropped on a busy queue or in-flight flags would stick.
    if ui_tx.send(event).is_err() {
        tracing::debug!("ui event receiver dropped");
    }
}

async fn save_file(file: ExportFile) -> SaveOutcome {
    let kind = file.kind;
    let filename = file.filename.clone();
    let chosen = tokio::task::spawn_blocking(move || pick_destination(kind, &filename)).await;
    let path = match chosen {
        Ok(Some(path)) => path,
        Ok(None) => return SaveOutcome::Cancelled { kind },
        Err(err) => {
            return SaveOutcome::Failed {
                kind,
                reason: format!("save dialog failed: {err}"),
            }
        }
    };
    write_export(file, path).await
}

fn pick_destination(kind: ExportKind, filename: &str) -> Option<PathBuf> {
    let (filter_name, extension) = match kind {
        ExportKind::Json => ("JSON", "json"),
        ExportKind::Presentation => ("PowerPoint", PRESENTATION_EXTENSION),
    };
    rfd::FileDialog::new()
        .set_file_name(filename)
        .add_filter(filter_name, &[extension])
        .save_file()
}

pub async fn write_export(file: ExportFile, path: PathBuf) -> SaveOutcome {
    let kind = file.kind;
    match tokio::fs::write(&path, &file.bytes).await {
        Ok(()) => {
            tracing::info!(path = %path.display(), bytes = file.bytes.len(), "saved export");
            SaveOutcome::Saved { kind, path }
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "failed to save export: {err}");
            SaveOutcome::Failed {
                kind,
                reason: err.to_string(),
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/runtime_tests.rs"]
mod tests;
