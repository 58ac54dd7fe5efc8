use super::*;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};
use shared::{domain::FormField, error::ApiError, protocol::PRESENTATION_MIME};
use tokio::{net::TcpListener, sync::Mutex};

const PPTX_BYTES: &[u8] = b"PK\x03\x04fake-presentation";

#[derive(Clone, Default)]
struct MockState {
    bodies: Arc<Mutex<Vec<(&'static str, Value)>>>,
}

impl MockState {
    async fn record(&self, endpoint: &'static str, body: Value) {
        self.bodies.lock().await.push((endpoint, body));
    }

    async fn recorded(&self) -> Vec<(&'static str, Value)> {
        self.bodies.lock().await.clone()
    }
}

async fn full_deck(State(state): State<MockState>, Json(body): Json<Value>) -> Json<Value> {
    state.record("generate-full-deck", body).await;
    Json(json!({
        "cover": "# Acme",
        "problem": "X is bad",
        "solution": "Y fixes X",
        "market": "Large",
        "product": "An app",
        "business_model": "SaaS",
        "competition": "None",
        "team": "Founders",
        "traction": "Pilot",
        "funding_needs": "$1M"
    }))
}

async fn slide(State(state): State<MockState>, Json(body): Json<Value>) -> Json<Value> {
    state.record("generate-slide", body.clone()).await;
    Json(json!({ "section": body["section"], "content": "New team bio" }))
}

async fn presentation(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    state.record("generate-ppt", body).await;
    ([(header::CONTENT_TYPE, PRESENTATION_MIME)], PPTX_BYTES.to_vec())
}

async fn unavailable() -> (StatusCode, Json<ApiError>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::new("LLM unavailable")),
    )
}

async fn bad_gateway() -> (StatusCode, &'static str) {
    (StatusCode::BAD_GATEWAY, "<html>upstream down</html>")
}

async fn not_json() -> &'static str {
    "definitely not a deck"
}

fn healthy_router(state: MockState) -> Router {
    Router::new()
        .route("/api/generate-full-deck", post(full_deck))
        .route("/api/generate-slide", post(slide))
        .route("/api/generate-ppt", post(presentation))
        .with_state(state)
}

fn failing_router() -> Router {
    Router::new()
        .route("/api/generate-full-deck", post(unavailable))
        .route("/api/generate-slide", post(bad_gateway))
        .route("/api/generate-ppt", post(unavailable))
}

async fn spawn_server(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("serve");
    });
    format!("http://{addr}/api")
}

fn acme_form() -> FormData {
    let mut form = FormData::default();
    form.set(FormField::StartupName, "Acme");
    form.set(FormField::Problem, "X");
    form.set(FormField::Solution, "Y");
    form
}

#[tokio::test]
async fn generate_full_deck_posts_flat_form_and_decodes_all_sections() {
    let state = MockState::default();
    let base_url = spawn_server(healthy_router(state.clone())).await;
    let service = HttpDeckService::new(&base_url).expect("service");

    let deck = service
        .generate_full_deck(&acme_form())
        .await
        .expect("deck");

    assert_eq!(deck.get(SectionKey::Cover), "# Acme");
    assert_eq!(deck.get(SectionKey::FundingNeeds), "$1M");
    assert_eq!(deck.iter().count(), SectionKey::COUNT);

    let recorded = state.recorded().await;
    assert_eq!(recorded.len(), 1);
    let (endpoint, body) = &recorded[0];
    assert_eq!(*endpoint, "generate-full-deck");
    assert_eq!(body["startup_name"], "Acme");
    assert_eq!(body["USP"], "");
}

#[tokio::test]
async fn generate_slide_sends_section_with_form_context() {
    let state = MockState::default();
    let base_url = spawn_server(healthy_router(state.clone())).await;
    let service = HttpDeckService::new(&base_url).expect("service");

    let content = service
        .generate_slide(SectionKey::Team, &acme_form())
        .await
        .expect("slide");
    assert_eq!(content, "New team bio");

    let recorded = state.recorded().await;
    let (endpoint, body) = &recorded[0];
    assert_eq!(*endpoint, "generate-slide");
    assert_eq!(body["section"], "team");
    assert_eq!(body["context"]["problem"], "X");
}

#[tokio::test]
async fn generate_presentation_returns_raw_bytes() {
    let state = MockState::default();
    let base_url = spawn_server(healthy_router(state.clone())).await;
    let service = HttpDeckService::new(&base_url).expect("service");
    let deck: Deck = [(SectionKey::Cover, "# Acme".to_string())]
        .into_iter()
        .collect();

    let bytes = service
        .generate_presentation(&acme_form(), &deck)
        .await
        .expect("presentation");
    assert_eq!(bytes, PPTX_BYTES);

    let recorded = state.recorded().await;
    let (_, body) = &recorded[0];
    assert_eq!(body["formData"]["startup_name"], "Acme");
    assert_eq!(body["deck"]["cover"], "# Acme");
}

#[tokio::test]
async fn rejected_request_carries_service_error_message() {
    let base_url = spawn_server(failing_router()).await;
    let service = HttpDeckService::new(&base_url).expect("service");

    let err = service
        .generate_full_deck(&acme_form())
        .await
        .expect_err("should fail");
    assert_eq!(
        err,
        ServiceError::Rejected {
            status: 500,
            message: Some("LLM unavailable".to_string()),
        }
    );
    assert_eq!(err.user_message("fallback"), "LLM unavailable");
}

#[tokio::test]
async fn rejected_request_without_json_body_uses_fallback() {
    let base_url = spawn_server(failing_router()).await;
    let service = HttpDeckService::new(&base_url).expect("service");

    let err = service
        .generate_slide(SectionKey::Market, &acme_form())
        .await
        .expect_err("should fail");
    assert_eq!(
        err,
        ServiceError::Rejected {
            status: 502,
            message: None,
        }
    );
    assert_eq!(
        err.user_message("Failed to regenerate market slide"),
        "Failed to regenerate market slide"
    );
}

#[tokio::test]
async fn success_with_unexpected_body_is_a_decode_error() {
    let router = Router::new().route("/api/generate-full-deck", post(not_json));
    let base_url = spawn_server(router).await;
    let service = HttpDeckService::new(&base_url).expect("service");

    let err = service
        .generate_full_deck(&acme_form())
        .await
        .expect_err("should fail");
    assert!(matches!(err, ServiceError::Decode(_)), "got {err:?}");
    assert_eq!(err.user_message("fallback"), "fallback");
}

#[tokio::test]
async fn unreachable_service_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);

    let service = HttpDeckService::new(&format!("http://{addr}/api")).expect("service");
    let err = service
        .generate_full_deck(&acme_form())
        .await
        .expect_err("should fail");
    assert!(matches!(err, ServiceError::Transport(_)), "got {err:?}");
}

#[test]
fn base_url_gains_trailing_slash_so_endpoints_append() {
    let url = normalize_base_url("http://localhost:5000/api").expect("url");
    assert_eq!(url.as_str(), "http://localhost:5000/api/");
    assert_eq!(
        url.join("generate-slide").expect("join").as_str(),
        "http://localhost:5000/api/generate-slide"
    );

    let already = normalize_base_url(" https://decks.example.com/v1/ ").expect("url");
    assert_eq!(already.as_str(), "https://decks.example.com/v1/");
}

#[test]
fn base_url_must_be_http() {
    assert!(matches!(
        normalize_base_url("localhost:5000"),
        Err(ServiceError::InvalidBaseUrl(_))
    ));
    assert!(matches!(
        normalize_base_url("ftp://example.com/api"),
        Err(ServiceError::InvalidBaseUrl(_))
    ));
    assert!(matches!(
        normalize_base_url("not a url"),
        Err(ServiceError::InvalidBaseUrl(_))
    ));
}

struct CountingService {
    calls: AtomicUsize,
}

#[async_trait]
impl DeckService for CountingService {
    async fn generate_full_deck(&self, _form: &FormData) -> Result<Deck, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(Deck::default())
    }

    async fn generate_slide(
        &self,
        section: SectionKey,
        _context: &FormData,
    ) -> Result<String, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("fresh {section}"))
    }

    async fn generate_presentation(
        &self,
        _form: &FormData,
        _deck: &Deck,
    ) -> Result<Vec<u8>, ServiceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(ServiceError::Transport("connection refused".to_string()))
    }
}

#[tokio::test]
async fn execute_routes_each_request_and_keeps_its_ticket() {
    let service = CountingService {
        calls: AtomicUsize::new(0),
    };
    let mut session = DeckSession::new();
    session.set_field(FormField::StartupName, "Acme");
    session.set_field(FormField::Problem, "X");
    session.set_field(FormField::Solution, "Y");

    let request = session.submit().expect("request");
    let DeckRequest::GenerateDeck { ticket, .. } = &request else {
        panic!("expected generate request");
    };
    let ticket = *ticket;
    match execute(&service, request).await {
        DeckResponse::DeckGenerated {
            ticket: got,
            result,
        } => {
            assert_eq!(got, ticket);
            assert!(result.is_ok());
        }
        other => panic!("unexpected response {other:?}"),
    }

    let regenerate = DeckRequest::RegenerateSlide {
        ticket,
        section: SectionKey::Traction,
        context: FormData::default(),
    };
    match execute(&service, regenerate).await {
        DeckResponse::SlideRegenerated {
            section, result, ..
        } => {
            assert_eq!(section, SectionKey::Traction);
            assert_eq!(result.as_deref(), Ok("fresh traction"));
        }
        other => panic!("unexpected response {other:?}"),
    }

    let download = DeckRequest::DownloadPresentation {
        ticket,
        form: FormData::default(),
        deck: Deck::default(),
    };
    assert!(matches!(
        execute(&service, download).await,
        DeckResponse::PresentationReady {
            result: Err(ServiceError::Transport(_)),
            ..
        }
    ));
    assert_eq!(service.calls.load(Ordering::SeqCst), 3);
}
