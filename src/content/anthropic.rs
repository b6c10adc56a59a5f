// Messages API client for the content generator

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::ContentGenerator;
use crate::config::GeneratorConfig;
use crate::error::AppError;

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

/// Blocking HTTP client for the Anthropic Messages API. The async
/// `ContentGenerator` impl runs calls on tokio's blocking pool.
#[derive(Clone)]
pub struct AnthropicClient {
    agent: ureq::Agent,
    endpoint: String,
    api_key: String,
    model: String,
    api_version: String,
}

impl AnthropicClient {
    pub fn new(config: &GeneratorConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(Duration::from_secs(10))
            .build();
        AnthropicClient {
            agent,
            endpoint: format!("{}/v1/messages", config.api_url.trim_end_matches('/')),
            api_key: config.api_key.clone().unwrap_or_default(),
            model: config.model.clone(),
            api_version: config.api_version.clone(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one user message and return the first text block of the reply.
    pub fn complete_blocking(&self, prompt: &str, max_tokens: u32) -> Result<String, AppError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens,
            messages: [Message {
                role: "user",
                content: prompt,
            }],
        };

        let response = match self
            .agent
            .post(&self.endpoint)
            .set("Content-Type", "application/json")
            .set("x-api-key", &self.api_key)
            .set("anthropic-version", &self.api_version)
            .send_json(&body)
        {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let detail = response.into_string().unwrap_or_default();
                tracing::error!(status, detail = %detail, "Anthropic API error");
                return Err(AppError::Upstream { status });
            }
            Err(e) => return Err(AppError::Transport(e.to_string())),
        };

        let reply: MessagesResponse = response
            .into_json()
            .map_err(|e| AppError::Parse(format!("Invalid API response: {}", e)))?;

        reply
            .content
            .into_iter()
            .find(|block| block.kind == "text")
            .and_then(|block| block.text)
            .ok_or_else(|| AppError::Parse("API response contained no text".into()))
    }
}

#[async_trait]
impl ContentGenerator for AnthropicClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, AppError> {
        let client = self.clone();
        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || client.complete_blocking(&prompt, max_tokens))
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?
    }
}
