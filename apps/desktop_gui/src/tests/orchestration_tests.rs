use client_core::Severity;
use crossbeam_channel::bounded;
use shared::domain::FormField;

use super::*;

fn ready_session() -> DeckSession {
    let mut session = DeckSession::new();
    session.set_field(FormField::StartupName, "Acme Rocket");
    session.set_field(FormField::Problem, "Launches are expensive");
    session.set_field(FormField::Solution, "Reusable boosters");
    session
}

#[test]
fn queued_request_reaches_the_worker() {
    let (cmd_tx, cmd_rx) = bounded(4);
    let mut session = ready_session();
    let request = session.submit().expect("request");

    dispatch_request(&cmd_tx, request, &mut session);

    assert!(matches!(
        cmd_rx.try_recv(),
        Ok(BackendCommand::Execute(DeckRequest::GenerateDeck { .. }))
    ));
    assert!(session.is_generating());
    assert!(session.notification().is_none());
}

#[test]
fn full_queue_hands_the_command_back() {
    let (cmd_tx, _cmd_rx) = bounded(1);
    let mut session = ready_session();
    let first = session.submit().expect("request");
    assert!(dispatch_backend_command(&cmd_tx, BackendCommand::Execute(first)).is_ok());

    let json = client_core::ExportFile {
        kind: client_core::ExportKind::Json,
        filename: "deck.json".to_string(),
        bytes: Vec::new(),
    };
    let err = match dispatch_backend_command(&cmd_tx, BackendCommand::SaveFile(json)) {
        Err(err) => err,
        Ok(()) => panic!("queue should be full"),
    };
    assert!(matches!(err.command, BackendCommand::SaveFile(_)));
    assert_eq!(err.error.message(), "UI command queue is full; please retry");
}

#[test]
fn disconnected_worker_clears_in_flight_flag_and_reports() {
    let (cmd_tx, cmd_rx) = bounded(4);
    drop(cmd_rx);
    let mut session = ready_session();
    let request = session.submit().expect("request");

    dispatch_request(&cmd_tx, request, &mut session);

    assert!(!session.is_generating());
    assert!(session.deck().is_none());
    let notification = session.notification().expect("notification");
    assert_eq!(notification.severity, Severity::Error);
    assert!(notification.message.contains("Backend worker disconnected"));
    assert!(session.submit().is_some());
}
