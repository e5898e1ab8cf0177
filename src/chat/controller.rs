use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, warn};

use super::client::ChatBackend;

/// Bot turn shown whenever the chat backend call fails.
pub const FALLBACK_APOLOGY: &str = "Sorry, something went wrong. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub text: String,
    pub sender: Sender,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::User,
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            sender: Sender::Bot,
        }
    }
}

/// A suggested question offered as a shortcut into the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaqSuggestion {
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    AwaitingResponse,
}

// Keeps the in-flight count right even if a send future is dropped mid-request
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Drives the chat widget.
///
/// The transcript is append-only: turns are added in the order they happen
/// and never edited or evicted.
pub struct ChatController<B> {
    backend: B,
    transcript: Mutex<Vec<ChatMessage>>,
    suggestions: Mutex<Vec<FaqSuggestion>>,
    suggestions_requested: AtomicBool,
    in_flight: AtomicUsize,
}

impl<B: ChatBackend> ChatController<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            transcript: Mutex::new(Vec::new()),
            suggestions: Mutex::new(Vec::new()),
            suggestions_requested: AtomicBool::new(false),
            in_flight: AtomicUsize::new(0),
        }
    }

    pub fn state(&self) -> ChatState {
        if self.in_flight.load(Ordering::SeqCst) > 0 {
            ChatState::AwaitingResponse
        } else {
            ChatState::Idle
        }
    }

    pub fn transcript(&self) -> Vec<ChatMessage> {
        self.transcript.lock().clone()
    }

    pub fn suggestions(&self) -> Vec<FaqSuggestion> {
        self.suggestions.lock().clone()
    }

    /// Entry point for typed input. Blank input is dropped without a request.
    pub async fn submit(&self, raw_input: &str) -> Option<ChatMessage> {
        let text = raw_input.trim();
        if text.is_empty() {
            return None;
        }
        Some(self.send_message(text).await)
    }

    /// Appends the user turn, asks the backend, appends and returns the bot turn.
    pub async fn send_message(&self, user_text: &str) -> ChatMessage {
        self.transcript.lock().push(ChatMessage::user(user_text));

        let result = {
            let _in_flight = InFlight::enter(&self.in_flight);
            self.backend.send(user_text).await
        };

        let reply = match result {
            Ok(text) => ChatMessage::bot(text),
            Err(e) => {
                warn!(error = %e, "chat request failed");
                ChatMessage::bot(FALLBACK_APOLOGY)
            }
        };

        self.transcript.lock().push(reply.clone());
        reply
    }

    /// Fetches the suggested questions. Only the first call hits the backend.
    ///
    /// Returns how many suggestions are available. A failed fetch is logged
    /// and leaves the list empty.
    pub async fn load_suggestions(&self) -> usize {
        if self.suggestions_requested.swap(true, Ordering::SeqCst) {
            return self.suggestions.lock().len();
        }

        match self.backend.top_faqs().await {
            Ok(labels) => {
                debug!(count = labels.len(), "loaded suggested questions");
                let mut suggestions = self.suggestions.lock();
                *suggestions = labels
                    .into_iter()
                    .map(|label| FaqSuggestion { label })
                    .collect();
                suggestions.len()
            }
            Err(e) => {
                warn!(error = %e, "failed to load suggested questions");
                0
            }
        }
    }

    /// Sends the suggestion at `index` as if the user had typed it.
    pub async fn activate_suggestion(&self, index: usize) -> Option<ChatMessage> {
        let label = self.suggestions.lock().get(index)?.label.clone();
        Some(self.send_message(&label).await)
    }
}
