/// Text generation seam
///
/// Every model-backed pipeline step talks to a [`TextGenerator`]; the Claude
/// client is the production implementation and tests substitute scripted ones.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

/// One request/response round trip: a system instruction, a user
/// instruction, an output bound and the model to ask
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub max_tokens: u32,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Return the single text reply for `request`.
    ///
    /// Transport, authentication and rate-limit failures are returned as
    /// errors; the reply text itself is never validated here.
    async fn generate(&self, request: &CompletionRequest) -> Result<String>;
}
