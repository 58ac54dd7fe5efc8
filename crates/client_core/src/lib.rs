//! Client side of the pitch deck service: the HTTP client and the session
//! controller that owns the form, the generated deck, and request state.

use async_trait::async_trait;
use shared::domain::{Deck, FormData, SectionKey};
use tracing::debug;

pub mod error;
mod http;
pub mod notification;
pub mod session;
pub mod ticket;

pub use error::ServiceError;
pub use http::{normalize_base_url, HttpDeckService};
pub use notification::{Notification, Severity, NOTIFICATION_DURATION};
pub use session::{DeckSession, ExportFile, ExportKind, SaveOutcome, View};
pub use ticket::Ticket;

/// Remote collaborator that generates and converts decks.
#[async_trait]
pub trait DeckService: Send + Sync {
    async fn generate_full_deck(&self, form: &FormData) -> Result<Deck, ServiceError>;
    async fn generate_slide(
        &self,
        section: SectionKey,
        context: &FormData,
    ) -> Result<String, ServiceError>;
    async fn generate_presentation(
        &self,
        form: &FormData,
        deck: &Deck,
    ) -> Result<Vec<u8>, ServiceError>;
}

/// A network operation the session has decided to issue.
#[derive(Debug, Clone)]
pub enum DeckRequest {
    GenerateDeck {
        ticket: Ticket,
        form: FormData,
    },
    RegenerateSlide {
        ticket: Ticket,
        section: SectionKey,
        context: FormData,
    },
    DownloadPresentation {
        ticket: Ticket,
        form: FormData,
        deck: Deck,
    },
}

impl DeckRequest {
    pub fn name(&self) -> &'static str {
        match self {
            DeckRequest::GenerateDeck { .. } => "generate_deck",
            DeckRequest::RegenerateSlide { .. } => "regenerate_slide",
            DeckRequest::DownloadPresentation { .. } => "download_presentation",
        }
    }

    /// The response this request produces when it never reached the service.
    pub fn into_failure(self, error: ServiceError) -> DeckResponse {
        match self {
            DeckRequest::GenerateDeck { ticket, .. } => DeckResponse::DeckGenerated {
                ticket,
                result: Err(error),
            },
            DeckRequest::RegenerateSlide {
                ticket, section, ..
            } => DeckResponse::SlideRegenerated {
                ticket,
                section,
                result: Err(error),
            },
            DeckRequest::DownloadPresentation { ticket, .. } => DeckResponse::PresentationReady {
                ticket,
                result: Err(error),
            },
        }
    }
}

/// Outcome of a [`DeckRequest`], fed back into [`DeckSession::apply`].
#[derive(Debug, Clone)]
pub enum DeckResponse {
    DeckGenerated {
        ticket: Ticket,
        result: Result<Deck, ServiceError>,
    },
    SlideRegenerated {
        ticket: Ticket,
        section: SectionKey,
        result: Result<String, ServiceError>,
    },
    PresentationReady {
        ticket: Ticket,
        result: Result<Vec<u8>, ServiceError>,
    },
}

/// Runs one request against the service. Never fails as a whole; the service
/// outcome is carried in the response.
pub async fn execute(service: &dyn DeckService, request: DeckRequest) -> DeckResponse {
    debug!(request = request.name(), "executing deck request");
    match request {
        DeckRequest::GenerateDeck { ticket, form } => DeckResponse::DeckGenerated {
            ticket,
            result: service.generate_full_deck(&form).await,
        },
        DeckRequest::RegenerateSlide {
            ticket,
            section,
            context,
        } => DeckResponse::SlideRegenerated {
            ticket,
            section,
            result: service.generate_slide(section, &context).await,
        },
        DeckRequest::DownloadPresentation { ticket, form, deck } => {
            DeckResponse::PresentationReady {
                ticket,
                result: service.generate_presentation(&form, &deck).await,
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
