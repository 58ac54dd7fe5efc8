//! Session controller: form state, the generated deck, in-flight requests,
//! and the single-slot notification.
//!
//! Every network operation is split in two. A `begin_*` call checks guards,
//! marks the operation in flight and hands back a [`DeckRequest`]; the
//! matching [`DeckResponse`] is later handed to [`DeckSession::apply`]. Results
//! whose ticket is no longer active (after a reset or a fresh deck) are dropped.

use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use shared::{
    domain::{Deck, FormData, FormField, SectionKey},
    protocol::PRESENTATION_EXTENSION,
};
use tracing::{debug, info, warn};

use crate::{
    notification::{Notification, Severity, NOTIFICATION_DURATION},
    ticket::{Slot, TicketCounter},
    DeckRequest, DeckResponse, ServiceError,
};

const GENERATE_FALLBACK: &str = "Failed to generate pitch deck";
const PRESENTATION_FALLBACK: &str = "Failed to generate PowerPoint presentation";
const DOWNLOAD_PRECONDITION: &str =
    "Please generate a pitch deck and ensure startup name is filled first.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Input,
    Review,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportKind {
    Json,
    Presentation,
}

impl ExportKind {
    fn label(self) -> &'static str {
        match self {
            ExportKind::Json => "JSON export",
            ExportKind::Presentation => "PowerPoint presentation",
        }
    }
}

/// A file ready to be written to disk by the front end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub kind: ExportKind,
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Result of asking the user where to save an [`ExportFile`] and writing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved { kind: ExportKind, path: PathBuf },
    Cancelled { kind: ExportKind },
    Failed { kind: ExportKind, reason: String },
}

#[derive(Debug, Default)]
struct RequestState {
    generating: Slot,
    regenerating: Slot<SectionKey>,
    downloading: Slot,
}

#[derive(Debug)]
pub struct DeckSession {
    form: FormData,
    deck: Option<Deck>,
    requests: RequestState,
    tickets: TicketCounter,
    notification: Option<Notification>,
    notification_ttl: Duration,
    error_banner: Option<String>,
    json_dialog_open: bool,
}

impl Default for DeckSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DeckSession {
    pub fn new() -> Self {
        Self::with_notification_ttl(NOTIFICATION_DURATION)
    }

    pub fn with_notification_ttl(notification_ttl: Duration) -> Self {
        Self {
            form: FormData::default(),
            deck: None,
            requests: RequestState::default(),
            tickets: TicketCounter::default(),
            notification: None,
            notification_ttl,
            error_banner: None,
            json_dialog_open: false,
        }
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    pub fn deck(&self) -> Option<&Deck> {
        self.deck.as_ref()
    }

    pub fn view(&self) -> View {
        if self.deck.is_some() {
            View::Review
        } else {
            View::Input
        }
    }

    pub fn is_generating(&self) -> bool {
        self.requests.generating.is_busy()
    }

    pub fn regenerating(&self) -> Option<SectionKey> {
        self.requests.regenerating.active_key()
    }

    pub fn is_downloading(&self) -> bool {
        self.requests.downloading.is_busy()
    }

    pub fn notification(&self) -> Option<&Notification> {
        self.notification.as_ref()
    }

    pub fn error_banner(&self) -> Option<&str> {
        self.error_banner.as_deref()
    }

    pub fn is_json_dialog_open(&self) -> bool {
        self.json_dialog_open
    }

    // -- input ---------------------------------------------------------------

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// Mutable access for text widgets that edit a field in place.
    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        self.form.get_mut(field)
    }

    pub fn missing_required_fields(&self) -> Vec<FormField> {
        self.form.missing_required()
    }

    /// Form submission. Blank required fields are reported instead of sent.
    pub fn submit(&mut self) -> Option<DeckRequest> {
        if self.is_generating() {
            debug!("submit ignored: deck generation already in flight");
            return None;
        }
        let missing = self.missing_required_fields();
        if !missing.is_empty() {
            let names: Vec<_> = missing.iter().map(|field| field.label()).collect();
            self.notify(
                Severity::Warning,
                format!("Please fill in {}.", join_names(&names)),
            );
            return None;
        }
        self.begin_generate()
    }

    // -- deck generation -----------------------------------------------------

    pub fn begin_generate(&mut self) -> Option<DeckRequest> {
        if self.is_generating() {
            return None;
        }
        let ticket = self.tickets.issue();
        self.requests.generating.begin(ticket, ());
        self.error_banner = None;
        info!(ticket = ticket.id(), "generating pitch deck");
        Some(DeckRequest::GenerateDeck {
            ticket,
            form: self.form.clone(),
        })
    }

    // -- slide regeneration --------------------------------------------------

    /// Starts regenerating one slide. Only one regeneration may run at a time;
    /// a second request is rejected rather than queued.
    pub fn begin_regenerate(&mut self, section: SectionKey) -> Option<DeckRequest> {
        if self.deck.is_none() {
            self.notify(
                Severity::Warning,
                "Generate a pitch deck before regenerating slides.",
            );
            return None;
        }
        if let Some(running) = self.regenerating() {
            debug!(%section, %running, "regeneration rejected: another slide in flight");
            self.notify(
                Severity::Warning,
                format!("Please wait: the {running} slide is still regenerating."),
            );
            return None;
        }
        let ticket = self.tickets.issue();
        self.requests.regenerating.begin(ticket, section);
        info!(ticket = ticket.id(), %section, "regenerating slide");
        Some(DeckRequest::RegenerateSlide {
            ticket,
            section,
            context: self.form.clone(),
        })
    }

    // -- export --------------------------------------------------------------

    /// Pretty-printed JSON of the current deck.
    pub fn export_json(&self) -> Option<String> {
        let deck = self.deck.as_ref()?;
        match serde_json::to_string_pretty(deck) {
            Ok(text) => Some(text),
            Err(err) => {
                warn!("failed to serialize deck: {err}");
                None
            }
        }
    }

    pub fn open_json_export(&mut self) {
        if self.deck.is_none() {
            return;
        }
        self.json_dialog_open = true;
        self.notify(Severity::Info, "JSON content ready for export.");
    }

    pub fn close_json_export(&mut self) {
        self.json_dialog_open = false;
    }

    pub fn record_clipboard_copy(&mut self, result: Result<(), String>) {
        match result {
            Ok(()) => self.notify(Severity::Success, "JSON copied to clipboard!"),
            Err(reason) => {
                warn!("clipboard copy failed: {reason}");
                self.notify(
                    Severity::Error,
                    format!("Failed to copy JSON to clipboard: {reason}"),
                );
            }
        }
    }

    /// `<startup_name>_pitch_deck.json`, or a generic stem when the name is blank.
    pub fn json_export_filename(&self) -> String {
        let stem = self.form.file_stem().unwrap_or_else(|| "pitch".to_string());
        format!("{stem}_pitch_deck.json")
    }

    pub fn json_export_file(&self) -> Option<ExportFile> {
        let text = self.export_json()?;
        Some(ExportFile {
            kind: ExportKind::Json,
            filename: self.json_export_filename(),
            bytes: text.into_bytes(),
        })
    }

    pub fn begin_download(&mut self) -> Option<DeckRequest> {
        let deck = match (&self.deck, self.form.file_stem()) {
            (Some(deck), Some(_)) if !deck.is_blank() => deck.clone(),
            _ => {
                self.notify(Severity::Warning, DOWNLOAD_PRECONDITION);
                return None;
            }
        };
        if self.is_downloading() {
            debug!("download ignored: presentation already in flight");
            return None;
        }
        let ticket = self.tickets.issue();
        self.requests.downloading.begin(ticket, ());
        info!(ticket = ticket.id(), "requesting presentation file");
        Some(DeckRequest::DownloadPresentation {
            ticket,
            form: self.form.clone(),
            deck,
        })
    }

    pub fn record_file_saved(&mut self, outcome: SaveOutcome) {
        match outcome {
            SaveOutcome::Saved {
                kind: ExportKind::Presentation,
                path,
            } => {
                info!(path = %path.display(), "presentation saved");
                self.notify(
                    Severity::Success,
                    "PowerPoint presentation downloaded successfully!",
                );
            }
            SaveOutcome::Saved {
                kind: ExportKind::Json,
                path,
            } => {
                info!(path = %path.display(), "deck json saved");
                self.notify(
                    Severity::Success,
                    format!("Saved JSON to {}", path.display()),
                );
            }
            SaveOutcome::Cancelled { kind } => {
                self.notify(Severity::Info, format!("{} was not saved.", kind.label()));
            }
            SaveOutcome::Failed { kind, reason } => {
                warn!(kind = kind.label(), "failed to save export: {reason}");
                self.notify(
                    Severity::Error,
                    format!("Failed to save {}: {reason}", kind.label()),
                );
            }
        }
    }

    // -- view ----------------------------------------------------------------

    /// Back to the input form. The deck is discarded and results of any
    /// regeneration or download still in flight will be ignored.
    pub fn reset(&mut self) {
        self.deck = None;
        self.requests.regenerating.cancel();
        self.requests.downloading.cancel();
        self.json_dialog_open = false;
        debug!("session reset to input view");
    }

    // -- notifications -------------------------------------------------------

    pub fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        self.notification = Some(Notification::new(severity, message));
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }

    /// Clears the notification once it has been visible for the configured duration.
    pub fn expire_notification(&mut self, now: Instant) {
        if self
            .notification
            .as_ref()
            .is_some_and(|notification| notification.is_expired(now, self.notification_ttl))
        {
            self.notification = None;
        }
    }

    /// Surfaces a failure raised outside the service calls (worker startup, queueing).
    pub fn report_error(&mut self, message: impl Into<String>) {
        self.notify(Severity::Error, message);
    }

    // -- responses -----------------------------------------------------------

    /// Applies a service outcome. Returns a file to save when a presentation
    /// download completed.
    pub fn apply(&mut self, response: DeckResponse) -> Option<ExportFile> {
        match response {
            DeckResponse::DeckGenerated { ticket, result } => {
                if self.requests.generating.finish(ticket).is_none() {
                    debug!(ticket = ticket.id(), "dropping stale deck generation result");
                    return None;
                }
                self.apply_generated(result);
                None
            }
            DeckResponse::SlideRegenerated {
                ticket,
                section,
                result,
            } => {
                if self.requests.regenerating.finish(ticket) != Some(section) {
                    debug!(ticket = ticket.id(), %section, "dropping stale slide result");
                    return None;
                }
                self.apply_regenerated(section, result);
                None
            }
            DeckResponse::PresentationReady { ticket, result } => {
                if self.requests.downloading.finish(ticket).is_none() {
                    debug!(ticket = ticket.id(), "dropping stale presentation result");
                    return None;
                }
                self.apply_presentation(result)
            }
        }
    }

    fn apply_generated(&mut self, result: Result<Deck, ServiceError>) {
        match result {
            Ok(deck) => {
                self.requests.regenerating.cancel();
                self.requests.downloading.cancel();
                self.deck = Some(deck);
                self.error_banner = None;
                self.notify(Severity::Success, "Pitch deck generated successfully!");
            }
            Err(err) => {
                warn!("deck generation failed: {err}");
                self.fail(err.user_message(GENERATE_FALLBACK));
            }
        }
    }

    fn apply_regenerated(&mut self, section: SectionKey, result: Result<String, ServiceError>) {
        match (result, self.deck.as_mut()) {
            (Ok(content), Some(deck)) => {
                deck.set(section, content);
                self.notify(
                    Severity::Success,
                    format!("{section} slide regenerated successfully!"),
                );
            }
            (Ok(_), None) => {
                debug!(%section, "slide result arrived without a deck");
            }
            (Err(err), _) => {
                warn!(%section, "slide regeneration failed: {err}");
                self.fail(err.user_message(&format!("Failed to regenerate {section} slide")));
            }
        }
    }

    fn apply_presentation(&mut self, result: Result<Vec<u8>, ServiceError>) -> Option<ExportFile> {
        match result {
            Ok(bytes) => {
                let stem = self.form.file_stem().unwrap_or_else(|| "pitch".to_string());
                Some(ExportFile {
                    kind: ExportKind::Presentation,
                    filename: format!("{stem}_pitch_deck.{PRESENTATION_EXTENSION}"),
                    bytes,
                })
            }
            Err(err) => {
                warn!("presentation download failed: {err}");
                self.notify(Severity::Error, err.user_message(PRESENTATION_FALLBACK));
                None
            }
        }
    }

    fn fail(&mut self, message: String) {
        self.error_banner = Some(message.clone());
        self.notify(Severity::Error, message);
    }
}

fn join_names(names: &[&str]) -> String {
    match names {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
