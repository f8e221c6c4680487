//! OpenAI-compatible chat-completion client.

use futures::{future::BoxFuture, FutureExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::config::Settings;

use super::{ensure_prompt, CompletionClient, CompletionError};

/// Client for any endpoint speaking the `/chat/completions` dialect.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: Client,
    url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiClient {
    pub fn new(settings: &Settings) -> Result<Self, CompletionError> {
        let http = Client::builder()
            .user_agent("phrs-assistant/0.1")
            .gzip(true)
            .brotli(true)
            .build()?;
        let api_key = Some(settings.completion_api_key.trim())
            .filter(|key| !key.is_empty())
            .map(str::to_string);
        Ok(Self {
            http,
            url: settings.chat_completions_url(),
            model: settings.completion_model.clone(),
            api_key,
        })
    }

    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn send(&self, prompt: &str) -> Result<String, CompletionError> {
        ensure_prompt(prompt)?;
        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: format!("`{prompt}`"),
            }],
        };
        let mut request = self.http.post(&self.url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let resp = request.send().await?;
        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Status { status, body });
        }
        let payload: ChatResponse = resp
            .json()
            .await
            .map_err(|e| CompletionError::Malformed(e.to_string()))?;
        let text = payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CompletionError::Malformed("no completion choice".into()))?;
        debug!(chars = text.len(), "completion received");
        info!("completion call finished");
        Ok(text.trim().to_string())
    }
}

impl CompletionClient for OpenAiClient {
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, CompletionError>> {
        self.send(prompt).boxed()
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}
