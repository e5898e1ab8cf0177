//! Translate/copy/speak actions over a single shared result display.

use parking_lot::Mutex;
use std::borrow::Cow;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::client::{TranslateResponse, TranslationBackend, TranslationRequest};
use crate::platform::{Clipboard, SpeechSynthesizer, Utterance};

/// Shown in the result display while a request is in flight.
pub const LOADING_SENTINEL: &str = "Translating...";

/// Prefix of every error rendered into the result display.
pub const ERROR_PREFIX: &str = "Error:";

/// Rendered when the translation service could not be reached or answered garbage.
pub const CONNECTIVITY_ERROR: &str = "Error: Could not connect to the translation service.";

/// Detail used when the service answered with neither a translation nor an error.
pub const UNEXPECTED_RESPONSE: &str = "Unexpected response from the translation service";

/// Label of the copy action at rest.
pub const COPY_LABEL: &str = "Copy";

/// Label of the copy action right after a successful copy.
pub const COPIED_LABEL: &str = "Copied!";

/// How long the copy acknowledgment stays up before reverting.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

/// Outcome of one translation request, as the user gets to see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationResult {
    Translated(String),
    /// The service answered with an `error` field.
    ServiceError(String),
    /// The service was unreachable or its answer could not be read.
    ConnectivityError,
}

impl TranslationResult {
    pub fn from_response(response: TranslateResponse) -> Self {
        match (response.translated_text, response.error) {
            (Some(text), _) if !text.is_empty() => Self::Translated(text),
            (_, Some(error)) => Self::ServiceError(error),
            (Some(text), None) => Self::Translated(text),
            (None, None) => Self::ServiceError(UNEXPECTED_RESPONSE.to_string()),
        }
    }

    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Translated(text) => Cow::Borrowed(text),
            Self::ServiceError(error) => Cow::Owned(format!("{ERROR_PREFIX} {error}")),
            Self::ConnectivityError => Cow::Borrowed(CONNECTIVITY_ERROR),
        }
    }

    pub const fn is_error(&self) -> bool {
        !matches!(self, Self::Translated(_))
    }
}

/// Current content of the result display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ResultDisplay {
    #[default]
    Empty,
    Loading,
    Result(TranslationResult),
}

impl ResultDisplay {
    pub fn text(&self) -> Cow<'_, str> {
        match self {
            Self::Empty => Cow::Borrowed(""),
            Self::Loading => Cow::Borrowed(LOADING_SENTINEL),
            Self::Result(result) => result.text(),
        }
    }

    /// The text copy and speak may act on.
    ///
    /// `None` while empty, loading, showing an error, or showing a translation
    /// that itself reads like the sentinel or an error.
    pub fn actionable_text(&self) -> Option<&str> {
        match self {
            Self::Result(TranslationResult::Translated(text))
                if !text.is_empty()
                    && !text.starts_with(ERROR_PREFIX)
                    && !text.starts_with(LOADING_SENTINEL) =>
            {
                Some(text)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslateOutcome {
    /// Blank input; nothing was sent.
    Ignored,
    /// A newer request started before this one finished; the display was left alone.
    Stale(TranslationResult),
    Displayed(TranslationResult),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyOutcome {
    Skipped,
    Copied,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakOutcome {
    Skipped,
    Started,
    Failed,
}

#[derive(Debug, Default)]
struct DisplayState {
    display: ResultDisplay,
    latest_ticket: u64,
    copied_at: Option<Instant>,
}

/// Drives the translation widget: one display, three actions.
///
/// Every `translate` call takes a ticket; only the holder of the latest
/// ticket may write its result into the display.
pub struct TranslationController<B, C, S> {
    backend: B,
    clipboard: C,
    speech: S,
    state: Mutex<DisplayState>,
    copy_feedback: Duration,
}

impl<B, C, S> TranslationController<B, C, S>
where
    B: TranslationBackend,
    C: Clipboard,
    S: SpeechSynthesizer,
{
    pub fn new(backend: B, clipboard: C, speech: S) -> Self {
        Self {
            backend,
            clipboard,
            speech,
            state: Mutex::new(DisplayState::default()),
            copy_feedback: COPY_FEEDBACK,
        }
    }

    #[must_use]
    pub const fn with_copy_feedback(mut self, duration: Duration) -> Self {
        self.copy_feedback = duration;
        self
    }

    pub fn display(&self) -> ResultDisplay {
        self.state.lock().display.clone()
    }

    pub fn display_text(&self) -> String {
        self.state.lock().display.text().into_owned()
    }

    pub async fn translate(
        &self,
        source_text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> TranslateOutcome {
        if source_text.trim().is_empty() {
            debug!("ignoring translate with blank input");
            return TranslateOutcome::Ignored;
        }

        let ticket = {
            let mut state = self.state.lock();
            state.latest_ticket += 1;
            state.display = ResultDisplay::Loading;
            state.latest_ticket
        };

        let request = TranslationRequest {
            source_text: source_text.to_string(),
            source_lang: source_lang.to_string(),
            target_lang: target_lang.to_string(),
        };

        let result = match self.backend.translate(&request).await {
            Ok(response) => TranslationResult::from_response(response),
            Err(e) => {
                warn!(error = %e, "translation request failed");
                TranslationResult::ConnectivityError
            }
        };

        let mut state = self.state.lock();
        if state.latest_ticket != ticket {
            debug!(
                ticket,
                latest = state.latest_ticket,
                "dropping stale translation response"
            );
            return TranslateOutcome::Stale(result);
        }
        state.display = ResultDisplay::Result(result.clone());
        TranslateOutcome::Displayed(result)
    }

    pub async fn copy(&self) -> CopyOutcome {
        let Some(text) = self.actionable_text() else {
            return CopyOutcome::Skipped;
        };

        match self.clipboard.write_text(&text).await {
            Ok(()) => {
                self.state.lock().copied_at = Some(Instant::now());
                CopyOutcome::Copied
            }
            Err(e) => {
                warn!(error = %e, "failed to copy text");
                CopyOutcome::Failed
            }
        }
    }

    /// Label of the copy action: `Copied!` shortly after a copy, `Copy` otherwise.
    pub fn copy_label(&self) -> &'static str {
        match self.state.lock().copied_at {
            Some(at) if at.elapsed() < self.copy_feedback => COPIED_LABEL,
            _ => COPY_LABEL,
        }
    }

    pub fn speak(&self, target_lang: &str) -> SpeakOutcome {
        let Some(text) = self.actionable_text() else {
            return SpeakOutcome::Skipped;
        };

        let utterance = Utterance {
            text,
            lang: target_lang.to_string(),
        };
        match self.speech.speak(&utterance) {
            Ok(()) => SpeakOutcome::Started,
            Err(e) => {
                warn!(error = %e, lang = target_lang, "failed to start speech");
                SpeakOutcome::Failed
            }
        }
    }

    fn actionable_text(&self) -> Option<String> {
        self.state
            .lock()
            .display
            .actionable_text()
            .map(str::to_string)
    }
}
