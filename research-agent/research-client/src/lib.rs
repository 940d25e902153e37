/// Deep research agent library
/// Exposes the research pipeline for reuse in CLI and HTTP server modes

pub mod context;
pub mod findings;
pub mod insights;
pub mod logging;
pub mod models;
pub mod orchestration;
pub mod planning;
pub mod prompts;
pub mod report;
pub mod retrieval;
pub mod server;
pub mod shared;
pub mod synthesis;

pub use context::{PipelineStep, RunContext, StepOutcome, StepRecord, StepStatus};
pub use logging::init_tracing;
pub use models::{Depth, ReportMetadata, ResearchFinding, ResearchReport, ResearchScope, ResearchSynthesis, ResearchTopic};
pub use orchestration::{ResearchAgent, ResearchConfig, ResearchRequest, ResearchRun, DEFAULT_MODEL, DEFAULT_OUTPUT_FILE};
pub use report::write_report;
pub use server::{router, HealthResponse, ResearchHttpRequest, ResearchHttpResponse};
pub use shared::{extract_json, ClaudeClient, CompletionRequest, StructuredReply, TextGenerator};
