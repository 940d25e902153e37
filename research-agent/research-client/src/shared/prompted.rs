/// Prompted extraction: one model round trip recovered into a structured reply

use anyhow::Result;

use super::generator::{CompletionRequest, TextGenerator};
use super::json_extract::extract_json;
use super::reply::StructuredReply;

/// Binds a generator to the model every step of a run asks
#[derive(Clone, Copy)]
pub struct PromptedExtractor<'a> {
    generator: &'a dyn TextGenerator,
    model: &'a str,
}

impl<'a> PromptedExtractor<'a> {
    pub fn new(generator: &'a dyn TextGenerator, model: &'a str) -> Self {
        Self { generator, model }
    }

    pub fn model(&self) -> &str {
        self.model
    }

    /// Send `prompt` and recover a structured reply.
    ///
    /// Malformed output never fails; only the generator's own errors
    /// (network, auth, rate limit) propagate.
    pub async fn ask(&self, system: &str, prompt: String, max_tokens: u32) -> Result<StructuredReply> {
        let request = CompletionRequest {
            model: self.model.to_string(),
            system: system.to_string(),
            prompt,
            max_tokens,
        };
        prompted_extraction(self.generator, &request).await
    }
}

pub async fn prompted_extraction(
    generator: &dyn TextGenerator,
    request: &CompletionRequest,
) -> Result<StructuredReply> {
    let reply = generator.generate(request).await?;
    let structured = extract_json(&reply);
    if structured.is_fallback() {
        tracing::warn!(
            "[EXTRACT-JSON] Reply was not structured, continuing with fallback record (model={})",
            request.model
        );
    }
    Ok(structured)
}
