use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// One translation request, built from the current input and language selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source_text: String,
    pub source_lang: String,
    pub target_lang: String,
}

#[derive(Debug, Serialize)]
struct TranslatePayload<'a> {
    text: &'a str,
    source_lang: &'a str,
    target_lang: &'a str,
}

impl<'a> From<&'a TranslationRequest> for TranslatePayload<'a> {
    fn from(request: &'a TranslationRequest) -> Self {
        Self {
            text: &request.source_text,
            source_lang: &request.source_lang,
            target_lang: &request.target_lang,
        }
    }
}

/// Body returned by `POST /translate`.
///
/// The service answers with exactly one of the two fields; both are optional
/// here so that odd shapes still decode and can be reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TranslateResponse {
    #[serde(default)]
    pub translated_text: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl TranslateResponse {
    pub fn translated(text: impl Into<String>) -> Self {
        Self {
            translated_text: Some(text.into()),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            translated_text: None,
            error: Some(message.into()),
        }
    }
}

/// Failures that never produced a usable response body.
#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("failed to connect to translation service at {url}: {reason}")]
    Unreachable { url: String, reason: String },
    #[error("translation service returned an unreadable response: {0}")]
    MalformedResponse(String),
}

/// Anything that can answer a [`TranslationRequest`].
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslateResponse, TranslateError>;
}

#[async_trait]
impl<T: TranslationBackend + ?Sized> TranslationBackend for Arc<T> {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslateResponse, TranslateError> {
        (**self).translate(request).await
    }
}

/// Translation backend speaking the service's JSON-over-HTTP protocol.
pub struct HttpTranslationBackend {
    client: Client,
    endpoint: String,
}

impl HttpTranslationBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn url(&self) -> String {
        format!("{}/translate", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl TranslationBackend for HttpTranslationBackend {
    async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslateResponse, TranslateError> {
        let url = self.url();
        debug!(
            %url,
            source_lang = %request.source_lang,
            target_lang = %request.target_lang,
            chars = request.source_text.chars().count(),
            "sending translation request"
        );

        let response = self
            .client
            .post(&url)
            .json(&TranslatePayload::from(request))
            .send()
            .await
            .map_err(|e| TranslateError::Unreachable {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        // Error bodies arrive with 4xx/5xx statuses, so the body decides, not the status
        let status = response.status();
        let body = response
            .json::<TranslateResponse>()
            .await
            .map_err(|e| TranslateError::MalformedResponse(format!("HTTP {status}: {e}")))?;

        debug!(%status, ok = body.translated_text.is_some(), "translation response received");
        Ok(body)
    }
}
