use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{de::DeserializeOwned, Serialize};
use shared::{
    domain::{Deck, FormData, SectionKey},
    error::ApiError,
    protocol::{
        GeneratePresentationRequest, GenerateSlideRequest, GenerateSlideResponse,
        GENERATE_FULL_DECK_PATH, GENERATE_PRESENTATION_PATH, GENERATE_SLIDE_PATH,
    },
};
use tracing::{debug, warn};
use url::Url;

use crate::{error::ServiceError, DeckService};

/// Deck service reached over HTTP with JSON bodies.
pub struct HttpDeckService {
    http: Client,
    base_url: Url,
}

impl HttpDeckService {
    pub fn new(base_url: &str) -> Result<Self, ServiceError> {
        Self::with_timeout(base_url, None)
    }

    pub fn with_timeout(base_url: &str, timeout: Option<Duration>) -> Result<Self, ServiceError> {
        let base_url = normalize_base_url(base_url)?;
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| ServiceError::Transport(format!("failed to build http client: {err}")))?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ServiceError> {
        self.base_url
            .join(path)
            .map_err(|err| ServiceError::InvalidBaseUrl(format!("{}{path}: {err}", self.base_url)))
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Response, ServiceError> {
        let url = self.endpoint(path)?;
        debug!(%url, "posting to deck service");
        let response = self.http.post(url.clone()).json(body).send().await.map_err(|err| {
            warn!(%url, "deck service request failed: {err}");
            ServiceError::Transport(err.to_string())
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.bytes().await.unwrap_or_default();
        let message = ApiError::message_from_body(&body);
        warn!(%url, status = status.as_u16(), ?message, "deck service rejected request");
        Err(ServiceError::Rejected {
            status: status.as_u16(),
            message,
        })
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let bytes = self.post(path, body).await?.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            warn!(path, "undecodable deck service response: {err}");
            ServiceError::Decode(err.to_string())
        })
    }
}

#[async_trait]
impl DeckService for HttpDeckService {
    async fn generate_full_deck(&self, form: &FormData) -> Result<Deck, ServiceError> {
        self.post_json(GENERATE_FULL_DECK_PATH, form).await
    }

    async fn generate_slide(
        &self,
        section: SectionKey,
        context: &FormData,
    ) -> Result<String, ServiceError> {
        let request = GenerateSlideRequest {
            section,
            context: context.clone(),
        };
        let response: GenerateSlideResponse =
            self.post_json(GENERATE_SLIDE_PATH, &request).await?;
        Ok(response.content.unwrap_or_default())
    }

    async fn generate_presentation(
        &self,
        form: &FormData,
        deck: &Deck,
    ) -> Result<Vec<u8>, ServiceError> {
        let request = GeneratePresentationRequest {
            form_data: form.clone(),
            deck: deck.clone(),
        };
        let bytes = self
            .post(GENERATE_PRESENTATION_PATH, &request)
            .await?
            .bytes()
            .await?;
        Ok(bytes.to_vec())
    }
}

/// Parses the configured base url and gives it a trailing slash so endpoint
/// paths are appended instead of replacing the last segment.
pub fn normalize_base_url(raw: &str) -> Result<Url, ServiceError> {
    let mut url = Url::parse(raw.trim())
        .map_err(|err| ServiceError::InvalidBaseUrl(format!("{raw}: {err}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ServiceError::InvalidBaseUrl(format!(
            "{raw}: expected an http:// or https:// url"
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}
