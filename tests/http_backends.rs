#![allow(clippy::unwrap_used)]
//! End-to-end tests of the controllers against a stub HTTP service.
//!
//! The stub speaks the same JSON as the real translation and FAQ services
//! and listens on an ephemeral localhost port.

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use serde_json::{Value, json};
use tokio::net::TcpListener;

use desk_cli::chat::{ChatController, ChatMessage, FALLBACK_APOLOGY, HttpChatBackend, Sender};
use desk_cli::platform::{Clipboard, SpeechSynthesizer, Utterance};
use desk_cli::translation::{
    CONNECTIVITY_ERROR, CopyOutcome, HttpTranslationBackend, SpeakOutcome, TranslateOutcome,
    TranslationController, TranslationResult,
};

async fn translate_handler(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    let text = body["text"].as_str().unwrap_or_default();
    let target = body["target_lang"].as_str().unwrap_or_default();

    match (text, target) {
        (_, "tlh") => (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "unsupported language"})),
        ),
        ("hello", "fr") => (StatusCode::OK, Json(json!({"translated_text": "bonjour"}))),
        (other, _) => (
            StatusCode::OK,
            Json(json!({"translated_text": other.to_uppercase()})),
        ),
    }
}

async fn chat_handler(Json(body): Json<Value>) -> Json<Value> {
    let reply = match body["message"].as_str().unwrap_or_default() {
        "What are your hours?" => "We are open 9am-5pm.",
        "Pricing?" => "Plans start at $10/month.",
        "Support?" => "Email support@example.com.",
        _ => "I'm not sure about that.",
    };
    Json(json!({"response": reply}))
}

async fn top_faqs_handler() -> Json<Value> {
    Json(json!({"top_faqs": ["Pricing?", "Support?"]}))
}

async fn broken_handler() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Starts the stub service and returns its base URL.
async fn spawn_stub() -> String {
    let app = Router::new()
        .route("/translate", post(translate_handler))
        .route("/chat", post(chat_handler))
        .route("/get_top_faqs", get(top_faqs_handler));
    serve(app).await
}

/// A service whose every route answers 500 with an empty body.
async fn spawn_broken_stub() -> String {
    let app = Router::new()
        .route("/translate", post(broken_handler))
        .route("/chat", post(broken_handler))
        .route("/get_top_faqs", get(broken_handler));
    serve(app).await
}

async fn serve(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

/// A localhost URL nothing is listening on.
async fn closed_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

#[derive(Default)]
struct RecordingClipboard {
    written: Mutex<Vec<String>>,
}

#[async_trait]
impl Clipboard for RecordingClipboard {
    async fn write_text(&self, text: &str) -> Result<()> {
        self.written.lock().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingSpeech {
    spoken: Mutex<Vec<Utterance>>,
}

impl SpeechSynthesizer for RecordingSpeech {
    fn speak(&self, utterance: &Utterance) -> Result<()> {
        self.spoken.lock().push(utterance.clone());
        Ok(())
    }
}

type TestController =
    TranslationController<HttpTranslationBackend, Arc<RecordingClipboard>, Arc<RecordingSpeech>>;

fn translation_controller(
    endpoint: &str,
) -> (TestController, Arc<RecordingClipboard>, Arc<RecordingSpeech>) {
    let clipboard = Arc::new(RecordingClipboard::default());
    let speech = Arc::new(RecordingSpeech::default());
    let controller = TranslationController::new(
        HttpTranslationBackend::new(endpoint),
        Arc::clone(&clipboard),
        Arc::clone(&speech),
    );
    (controller, clipboard, speech)
}

#[tokio::test]
async fn test_translate_copy_and_speak() {
    let endpoint = spawn_stub().await;
    let (controller, clipboard, speech) = translation_controller(&endpoint);

    let outcome = controller.translate("hello", "en", "fr").await;
    assert_eq!(
        outcome,
        TranslateOutcome::Displayed(TranslationResult::Translated("bonjour".to_string()))
    );
    assert_eq!(controller.display_text(), "bonjour");

    assert_eq!(controller.copy().await, CopyOutcome::Copied);
    assert_eq!(controller.copy_label(), "Copied!");
    assert_eq!(*clipboard.written.lock(), vec!["bonjour".to_string()]);

    assert_eq!(controller.speak("fr"), SpeakOutcome::Started);
    assert_eq!(
        *speech.spoken.lock(),
        vec![Utterance {
            text: "bonjour".to_string(),
            lang: "fr".to_string(),
        }]
    );
}

#[tokio::test]
async fn test_service_error_is_displayed() {
    let endpoint = spawn_stub().await;
    let (controller, clipboard, speech) = translation_controller(&endpoint);

    controller.translate("hello", "en", "tlh").await;

    assert_eq!(controller.display_text(), "Error: unsupported language");
    assert_eq!(controller.copy().await, CopyOutcome::Skipped);
    assert_eq!(controller.speak("tlh"), SpeakOutcome::Skipped);
    assert!(clipboard.written.lock().is_empty());
    assert!(speech.spoken.lock().is_empty());
}

#[tokio::test]
async fn test_unreachable_service_shows_connectivity_error() {
    let endpoint = closed_endpoint().await;
    let (controller, _, _) = translation_controller(&endpoint);

    let outcome = controller.translate("hello", "en", "fr").await;

    assert_eq!(
        outcome,
        TranslateOutcome::Displayed(TranslationResult::ConnectivityError)
    );
    assert_eq!(controller.display_text(), CONNECTIVITY_ERROR);
}

#[tokio::test]
async fn test_unreadable_body_shows_connectivity_error() {
    let endpoint = spawn_broken_stub().await;
    let (controller, _, _) = translation_controller(&endpoint);

    controller.translate("hello", "en", "fr").await;

    assert_eq!(controller.display_text(), CONNECTIVITY_ERROR);
}

#[tokio::test]
async fn test_retranslation_replaces_result() {
    let endpoint = spawn_stub().await;
    let (controller, _, _) = translation_controller(&endpoint);

    controller.translate("hello", "en", "fr").await;
    controller.translate("good night", "en", "de").await;

    assert_eq!(controller.display_text(), "GOOD NIGHT");
}

#[tokio::test]
async fn test_chat_round_trip() {
    let endpoint = spawn_stub().await;
    let controller = ChatController::new(HttpChatBackend::new(endpoint));

    let reply = controller.submit("  What are your hours?  ").await.unwrap();

    assert_eq!(reply, ChatMessage::bot("We are open 9am-5pm."));
    assert_eq!(
        controller.transcript(),
        vec![
            ChatMessage::user("What are your hours?"),
            ChatMessage::bot("We are open 9am-5pm."),
        ]
    );
}

#[tokio::test]
async fn test_suggestions_feed_the_conversation() {
    let endpoint = spawn_stub().await;
    let controller = ChatController::new(HttpChatBackend::new(endpoint));

    assert_eq!(controller.load_suggestions().await, 2);
    let labels: Vec<String> = controller
        .suggestions()
        .into_iter()
        .map(|s| s.label)
        .collect();
    assert_eq!(labels, vec!["Pricing?", "Support?"]);

    let reply = controller.activate_suggestion(1).await.unwrap();
    assert_eq!(reply.text, "Email support@example.com.");

    let transcript = controller.transcript();
    assert_eq!(transcript[0], ChatMessage::user("Support?"));
    assert_eq!(transcript[1].sender, Sender::Bot);
}

#[tokio::test]
async fn test_chat_server_error_falls_back_to_apology() {
    let endpoint = spawn_broken_stub().await;
    let controller = ChatController::new(HttpChatBackend::new(endpoint));

    assert_eq!(controller.load_suggestions().await, 0);
    assert!(controller.suggestions().is_empty());

    let reply = controller.submit("What are your hours?").await.unwrap();
    assert_eq!(reply, ChatMessage::bot(FALLBACK_APOLOGY));
    assert_eq!(controller.transcript().len(), 2);
}

#[tokio::test]
async fn test_chat_unreachable_falls_back_to_apology() {
    let endpoint = closed_endpoint().await;
    let controller = ChatController::new(HttpChatBackend::new(endpoint));

    let reply = controller.submit("hello").await.unwrap();

    assert_eq!(reply.text, FALLBACK_APOLOGY);
}
