/// Shared plumbing for every pipeline step
/// Model client, text generation seam and structured-reply recovery

pub mod claude;
pub mod generator;
pub mod json_extract;
pub mod prompted;
pub mod reply;

pub use claude::{call_claude, ClaudeClient, ClaudeMessage, LlmError, ANTHROPIC_MESSAGES_URL, ANTHROPIC_VERSION};
pub use generator::{CompletionRequest, TextGenerator};
pub use json_extract::extract_json;
pub use prompted::{prompted_extraction, PromptedExtractor};
pub use reply::{StructuredReply, PARSE_FAILURE, RAW_TEXT_LIMIT};
