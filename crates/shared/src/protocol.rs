use serde::{Deserialize, Serialize};

use crate::domain::{Deck, FormData, SectionKey};

pub const GENERATE_FULL_DECK_PATH: &str = "generate-full-deck";
pub const GENERATE_SLIDE_PATH: &str = "generate-slide";
pub const GENERATE_PRESENTATION_PATH: &str = "generate-ppt";

pub const PRESENTATION_EXTENSION: &str = "pptx";
pub const PRESENTATION_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// `POST generate-slide` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateSlideRequest {
    pub section: SectionKey,
    pub context: FormData,
}

/// `POST generate-slide` success body. The service may echo `section`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateSlideResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// `POST generate-ppt` body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratePresentationRequest {
    #[serde(rename = "formData")]
    pub form_data: FormData,
    pub deck: Deck,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
