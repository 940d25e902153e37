/// Claude API integration module
/// Sends one system + user message pair to the Anthropic Messages API and
/// returns the text of the first content block

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::generator::{CompletionRequest, TextGenerator};

pub const ANTHROPIC_MESSAGES_URL: &str = "https://api.anthropic.com/v1/messages";
pub const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ClaudeMessage {
    pub role: String,
    pub content: String,
}

/// Claude API request
#[derive(Debug, Serialize)]
pub struct ClaudeRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<ClaudeMessage>,
}

/// Claude API response
#[derive(Debug, Deserialize)]
pub struct ClaudeResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
    #[serde(default)]
    pub stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Claude API error ({status}): {body}")]
    Api { status: u16, body: String },
    #[error("No response from Claude")]
    EmptyReply,
}

/// Anthropic Messages API client
#[derive(Debug, Clone)]
pub struct ClaudeClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl ClaudeClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_endpoint(api_key, ANTHROPIC_MESSAGES_URL)
    }

    pub fn with_endpoint(api_key: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl TextGenerator for ClaudeClient {
    async fn generate(&self, request: &CompletionRequest) -> Result<String> {
        call_claude(&self.http, &self.endpoint, &self.api_key, request).await
    }
}

/// Call Claude API with a single user turn
pub async fn call_claude(
    client: &reqwest::Client,
    endpoint: &str,
    api_key: &str,
    request: &CompletionRequest,
) -> Result<String> {
    let body = ClaudeRequest {
        model: request.model.clone(),
        max_tokens: request.max_tokens,
        system: request.system.clone(),
        messages: vec![ClaudeMessage {
            role: "user".to_string(),
            content: request.prompt.clone(),
        }],
    };

    tracing::debug!(
        "[CLAUDE] POST {} model={} max_tokens={} prompt_chars={}",
        endpoint,
        body.model,
        body.max_tokens,
        request.prompt.chars().count()
    );

    let response = client
        .post(endpoint)
        .header("x-api-key", api_key)
        .header("anthropic-version", ANTHROPIC_VERSION)
        .json(&body)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await?;
        return Err(LlmError::Api {
            status: status.as_u16(),
            body: error_text,
        }
        .into());
    }

    let claude_response: ClaudeResponse = response.json().await?;
    tracing::debug!(
        "[CLAUDE] Response received: blocks={} stop_reason={:?}",
        claude_response.content.len(),
        claude_response.stop_reason
    );

    match claude_response.content.into_iter().next() {
        Some(block) => Ok(block.text),
        None => Err(LlmError::EmptyReply.into()),
    }
}
