/// Prompts module
/// Centralized management of every instruction sent to the model, one file per
/// pipeline stage. Each stage exports its system prompt, its output bound and
/// a builder for the user instruction.

pub mod extraction;
pub mod planning;
pub mod report;
pub mod synthesis;

pub use extraction::{get_extraction_prompt, EXTRACTION_MAX_TOKENS, EXTRACTION_SYSTEM_PROMPT, MAX_DOCUMENT_CHARS};
pub use planning::{get_planning_prompt, PLANNING_MAX_TOKENS, PLANNING_SYSTEM_PROMPT};
pub use report::{get_report_prompt, REPORT_MAX_TOKENS, REPORT_SYSTEM_PROMPT};
pub use synthesis::{
    get_insight_prompt, get_synthesis_prompt, INSIGHT_MAX_TOKENS, INSIGHT_SYSTEM_PROMPT, SYNTHESIS_MAX_TOKENS,
    SYNTHESIS_SYSTEM_PROMPT,
};
