//! Text generation backend for the demo
//!
//! Defines the `TextGenerator` seam the orchestrator talks to, plus an HTTP
//! implementation for OpenAI-compatible chat-completions endpoints. Local
//! servers (llama.cpp, LM Studio, vLLM and friends) all speak this format,
//! which makes them drop-in model hosts for the demo.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Role of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged message in a conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Knobs for a single generation call
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub max_tokens: usize,
    /// Omitted from the request when None; some local backends reject the
    /// parameter entirely
    pub temperature: Option<f32>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            temperature: Some(0.0),
        }
    }
}

/// One-shot completion backend: role-tagged messages in, assistant text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, messages: &[Message], options: &GenerationOptions)
        -> Result<String>;
}

/// Chat-completions client for OpenAI-compatible endpoints.
pub struct HttpGenerator {
    base_url: String,
    model: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

impl HttpGenerator {
    pub fn new(base_url: &str, model: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client: reqwest::Client::new(),
        }
    }

    fn build_request_body(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> serde_json::Value {
        let mut body = serde_json::json!({
            "model": self.model,
            "messages": messages,
            "max_tokens": options.max_tokens,
            "stream": false,
        });
        if let Some(temperature) = options.temperature {
            body["temperature"] = serde_json::json!(temperature);
        }
        body
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    async fn generate(
        &self,
        messages: &[Message],
        options: &GenerationOptions,
    ) -> Result<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = self.build_request_body(messages, options);
        debug!(url = %url, messages = messages.len(), "sending completion request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .context("failed to reach text generation endpoint")?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(anyhow!(
                "text generation endpoint returned {status}: {detail}"
            ));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .context("failed to decode completion response")?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| anyhow!("completion response contained no choices"))?;

        debug!(chars = content.len(), "received completion");
        Ok(content.trim().to_string())
    }
}
