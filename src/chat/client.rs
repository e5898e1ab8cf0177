use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Serialize)]
struct ChatPayload<'a> {
    message: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    response: String,
}

#[derive(Debug, Default, Deserialize)]
struct TopFaqs {
    #[serde(default)]
    top_faqs: Option<Vec<String>>,
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("failed to reach chat service at {url}: {reason}")]
    Transport { url: String, reason: String },
    #[error("chat service at {url} answered with HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("chat service at {url} returned an unreadable response: {reason}")]
    Decode { url: String, reason: String },
}

/// The chat backend: answers messages and offers suggested questions.
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Sends one user message and returns the bot's reply text.
    async fn send(&self, message: &str) -> Result<String, ChatError>;

    /// Fetches the suggested questions. An absent list is an empty list.
    async fn top_faqs(&self) -> Result<Vec<String>, ChatError>;
}

#[async_trait]
impl<T: ChatBackend + ?Sized> ChatBackend for Arc<T> {
    async fn send(&self, message: &str) -> Result<String, ChatError> {
        (**self).send(message).await
    }

    async fn top_faqs(&self) -> Result<Vec<String>, ChatError> {
        (**self).top_faqs().await
    }
}

/// Chat backend over HTTP: `POST /chat` and `GET /get_top_faqs`.
pub struct HttpChatBackend {
    client: Client,
    endpoint: String,
}

impl HttpChatBackend {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.endpoint.trim_end_matches('/'))
    }

    async fn ok_response(
        url: &str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, ChatError> {
        let response = request.send().await.map_err(|e| ChatError::Transport {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ChatError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl ChatBackend for HttpChatBackend {
    async fn send(&self, message: &str) -> Result<String, ChatError> {
        let url = self.url("chat");
        debug!(%url, chars = message.chars().count(), "sending chat message");

        let request = self.client.post(&url).json(&ChatPayload { message });
        let reply = Self::ok_response(&url, request)
            .await?
            .json::<ChatReply>()
            .await
            .map_err(|e| ChatError::Decode {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        Ok(reply.response)
    }

    async fn top_faqs(&self) -> Result<Vec<String>, ChatError> {
        let url = self.url("get_top_faqs");
        debug!(%url, "fetching suggested questions");

        let body = Self::ok_response(&url, self.client.get(&url))
            .await?
            .json::<TopFaqs>()
            .await
            .map_err(|e| ChatError::Decode {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        Ok(body.top_faqs.unwrap_or_default())
    }
}
