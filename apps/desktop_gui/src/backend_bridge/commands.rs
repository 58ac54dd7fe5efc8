//! Backend commands queued from UI to backend worker.

use client_core::{DeckRequest, ExportFile};

#[derive(Debug)]
pub enum BackendCommand {
    /// Call the deck service and report the outcome as a `UiEvent::Deck`.
    Execute(DeckRequest),
    /// Ask the user for a destination and write the file there.
    SaveFile(ExportFile),
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Execute(request) => request.name(),
            BackendCommand::SaveFile(_) => "save_file",
        }
    }
}
