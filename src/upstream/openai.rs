//! OpenAI chat-completions client.
//!
//! Sends one `POST {base_url}/chat/completions` per call with bearer auth,
//! requesting JSON-object output at the configured temperature.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{CompletionClient, CompletionRequest, UpstreamError};
use crate::config::UpstreamConfig;

/// OpenAI-compatible completion client.
pub struct OpenAiClient {
    client: Client,
    url: String,
    api_key: String,
    model: String,
    temperature: f32,
}

impl OpenAiClient {
    /// Build a client from upstream settings and an API key.
    ///
    /// No request timeout is set unless `timeout_seconds` is configured.
    pub fn new(config: &UpstreamConfig, api_key: impl Into<String>) -> Result<Self, UpstreamError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_seconds {
            builder = builder.timeout(std::time::Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| UpstreamError::Client(e.to_string()))?;

        Ok(Self {
            client,
            url: config.completions_url(),
            api_key: api_key.into(),
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }

    fn build_request<'a>(&'a self, request: &'a CompletionRequest) -> ChatCompletionRequest<'a> {
        ChatCompletionRequest {
            model: &self.model,
            response_format: ResponseFormat {
                r#type: "json_object",
            },
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: self.temperature,
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<Option<String>, UpstreamError> {
        let body = self.build_request(request);

        tracing::debug!(
            model = %self.model,
            prompt_len = request.user.len(),
            "Sending request to completion API"
        );

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(UpstreamError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let data: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| UpstreamError::Decode(e.to_string()))?;

        let content = data
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content);

        tracing::debug!(
            content_len = content.as_ref().map(String::len).unwrap_or(0),
            "Received completion"
        );

        Ok(content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}

// ── Request ──

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    response_format: ResponseFormat,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    r#type: &'static str,
}

// ── Response ──

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}
