use anyhow::Result;

use crate::chat::{ChatSession, SessionConfig};
use crate::config::{ConfigManager, resolve_chat_endpoint};

pub struct ChatOptions {
    pub endpoint: Option<String>,
}

pub async fn run_chat(options: ChatOptions) -> Result<()> {
    let file_config = ConfigManager::new()?.load_or_default()?;
    let endpoint = resolve_chat_endpoint(options.endpoint.as_deref(), &file_config)?;

    ChatSession::new(SessionConfig::new(endpoint)).run().await
}
