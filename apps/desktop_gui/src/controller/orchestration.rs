//! Command orchestration helpers from UI actions to backend command queue.

use client_core::{DeckRequest, DeckSession, ServiceError};
use crossbeam_channel::{Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{UiError, UiErrorContext};

/// A command the queue refused, handed back with the reason.
pub struct DispatchError {
    pub command: BackendCommand,
    pub error: UiError,
}

pub fn dispatch_backend_command(
    cmd_tx: &Sender<BackendCommand>,
    cmd: BackendCommand,
) -> Result<(), DispatchError> {
    let cmd_name = cmd.name();
    match cmd_tx.try_send(cmd) {
        Ok(()) => {
            tracing::debug!(command = cmd_name, "queued ui->backend command");
            Ok(())
        }
        Err(TrySendError::Full(command)) => Err(DispatchError {
            command,
            error: UiError::from_message(
                UiErrorContext::CommandQueue,
                "UI command queue is full; please retry",
            ),
        }),
        Err(TrySendError::Disconnected(command)) => Err(DispatchError {
            command,
            error: UiError::from_message(
                UiErrorContext::CommandQueue,
                "Backend worker disconnected (possible startup/runtime failure); restart the app",
            ),
        }),
    }
}

/// Queues a service request. When the worker cannot take it, the request is
/// resolved as a failure right away so its in-flight flag clears.
pub fn dispatch_request(
    cmd_tx: &Sender<BackendCommand>,
    request: DeckRequest,
    session: &mut DeckSession,
) {
    let Err(DispatchError { command, error }) =
        dispatch_backend_command(cmd_tx, BackendCommand::Execute(request))
    else {
        return;
    };
    tracing::warn!(command = command.name(), "{}", error.message());
    if let BackendCommand::Execute(request) = command {
        let _ = session.apply(request.into_failure(ServiceError::Transport(
            error.message().to_string(),
        )));
    }
    session.report_error(error.display_message());
}

#[cfg(test)]
#[path = "../tests/orchestration_tests.rs"]
mod tests;
