/// Orchestration logic for the research agent
/// Runs the six steps strictly in order against one RunContext:
/// - plan, retrieve, extract, synthesize, insights, report
/// Every step degrades to a default instead of aborting the run.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};

use search_core::{DocumentSource, GeneratedCorpus, MockAcademicSearch};

use crate::context::{PipelineStep, RunContext, StepOutcome};
use crate::findings::extract_information;
use crate::insights::generate_insights;
use crate::models::{Depth, ResearchReport};
use crate::planning::create_research_plan;
use crate::report::format_research_output;
use crate::retrieval::retrieve_documents;
use crate::shared::{ClaudeClient, PromptedExtractor, TextGenerator, ANTHROPIC_MESSAGES_URL};
use crate::synthesis::synthesize_findings;

pub const DEFAULT_MODEL: &str = "claude-3-7-sonnet-20250219";
pub const DEFAULT_OUTPUT_FILE: &str = "research_output.json";
pub const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

/// Agent configuration
#[derive(Debug, Clone)]
pub struct ResearchConfig {
    pub anthropic_api_key: String,
    pub anthropic_api_url: String,
    pub model: String,
    /// When set, documents come from the academic search source instead of
    /// the generated corpus
    pub search_api_key: Option<String>,
    pub output_file: PathBuf,
    pub http_port: u16,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            anthropic_api_key: PLACEHOLDER_API_KEY.to_string(),
            anthropic_api_url: ANTHROPIC_MESSAGES_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            search_api_key: None,
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            http_port: 3001,
        }
    }
}

impl ResearchConfig {
    /// Read configuration from the environment.
    ///
    /// A missing `ANTHROPIC_API_KEY` is not an error here: a placeholder is
    /// used and the failure surfaces on the first model call.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let anthropic_api_key = match std::env::var("ANTHROPIC_API_KEY") {
            Ok(key) if !key.trim().is_empty() => key,
            _ => {
                tracing::warn!("[CONFIG] ANTHROPIC_API_KEY not set, using placeholder value; model calls will fail");
                defaults.anthropic_api_key
            }
        };

        let anthropic_api_url = std::env::var("ANTHROPIC_API_URL").unwrap_or(defaults.anthropic_api_url);
        let model = std::env::var("RESEARCH_MODEL").unwrap_or(defaults.model);
        let search_api_key = std::env::var("SEARCH_API_KEY").ok().filter(|k| !k.trim().is_empty());
        let output_file = std::env::var("RESEARCH_OUTPUT_FILE")
            .map(PathBuf::from)
            .unwrap_or(defaults.output_file);
        let http_port = std::env::var("RESEARCH_HTTP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(defaults.http_port);

        Self {
            anthropic_api_key,
            anthropic_api_url,
            model,
            search_api_key,
            output_file,
            http_port,
        }
    }

    pub fn has_placeholder_key(&self) -> bool {
        self.anthropic_api_key == PLACEHOLDER_API_KEY
    }
}

/// One research invocation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchRequest {
    pub query: String,
    #[serde(default)]
    pub depth: Depth,
    /// Advisory budget in seconds; exceeding it only logs a warning
    #[serde(default)]
    pub time_limit: Option<u64>,
}

impl ResearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            depth: Depth::default(),
            time_limit: None,
        }
    }

    pub fn with_depth(mut self, depth: Depth) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_time_limit(mut self, seconds: Option<u64>) -> Self {
        self.time_limit = seconds;
        self
    }
}

/// A finished run: the report plus everything accumulated to produce it
#[derive(Debug)]
pub struct ResearchRun {
    pub report: ResearchReport,
    pub context: RunContext,
    pub elapsed: Duration,
}

pub struct ResearchAgent {
    generator: Arc<dyn TextGenerator>,
    source: Arc<dyn DocumentSource>,
    model: String,
}

impl ResearchAgent {
    pub fn new(generator: Arc<dyn TextGenerator>, source: Arc<dyn DocumentSource>, model: impl Into<String>) -> Self {
        Self {
            generator,
            source,
            model: model.into(),
        }
    }

    /// Claude-backed agent; the document source follows `search_api_key`
    pub fn from_config(config: &ResearchConfig) -> Self {
        let generator = Arc::new(ClaudeClient::with_endpoint(
            config.anthropic_api_key.clone(),
            config.anthropic_api_url.clone(),
        ));
        let source: Arc<dyn DocumentSource> = if config.search_api_key.is_some() {
            Arc::new(MockAcademicSearch::default())
        } else {
            Arc::new(GeneratedCorpus::default())
        };
        tracing::info!("[CONFIG] model={} document_source={}", config.model, source.name());
        Self::new(generator, source, config.model.clone())
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Run the full pipeline for one query.
    ///
    /// Step failures never abort the run; only a blank query is rejected.
    pub async fn conduct_research(&self, request: &ResearchRequest) -> Result<ResearchRun> {
        let query = request.query.trim();
        if query.is_empty() {
            bail!("research query must not be empty");
        }

        let started = Instant::now();
        let budget = request.time_limit.map(Duration::from_secs);
        let extractor = PromptedExtractor::new(self.generator.as_ref(), &self.model);
        let mut ctx = RunContext::new();

        tracing::info!("[PIPELINE] Creating research plan (depth={})...", request.depth);
        let step_started = Instant::now();
        let outcome = create_research_plan(&extractor, &mut ctx, query, request.depth).await;
        let topic = finish_step(&mut ctx, PipelineStep::Plan, outcome, step_started, started, budget);

        tracing::info!("[PIPELINE] Retrieving documents...");
        let step_started = Instant::now();
        let outcome = retrieve_documents(self.source.as_ref(), &mut ctx, &topic).await;
        let documents = finish_step(&mut ctx, PipelineStep::Retrieve, outcome, step_started, started, budget);

        tracing::info!("[PIPELINE] Extracting information...");
        let step_started = Instant::now();
        let outcome = extract_information(&extractor, &mut ctx, &documents, &topic).await;
        let findings = finish_step(&mut ctx, PipelineStep::Extract, outcome, step_started, started, budget);

        tracing::info!("[PIPELINE] Synthesizing findings...");
        let step_started = Instant::now();
        let outcome = synthesize_findings(&extractor, &mut ctx, &findings, &topic).await;
        let synthesis = finish_step(&mut ctx, PipelineStep::Synthesize, outcome, step_started, started, budget);

        tracing::info!("[PIPELINE] Generating insights...");
        let step_started = Instant::now();
        let outcome = generate_insights(&extractor, &mut ctx, synthesis, &topic).await;
        let synthesis = finish_step(&mut ctx, PipelineStep::Insights, outcome, step_started, started, budget);

        tracing::info!("[PIPELINE] Formatting research output...");
        let step_started = Instant::now();
        let outcome = format_research_output(&extractor, &ctx, &synthesis).await;
        let report = finish_step(&mut ctx, PipelineStep::Report, outcome, step_started, started, budget);

        let elapsed = started.elapsed();
        let degraded = ctx.degraded_steps();
        if degraded.is_empty() {
            tracing::info!("[PIPELINE] ✓ Research completed in {:.2} seconds", elapsed.as_secs_f64());
        } else {
            tracing::warn!(
                "[PIPELINE] Research completed in {:.2} seconds with degraded steps: {:?}",
                elapsed.as_secs_f64(),
                degraded
            );
        }

        Ok(ResearchRun {
            report,
            context: ctx,
            elapsed,
        })
    }
}

/// Record the outcome, check the advisory budget, hand the value on
fn finish_step<T>(
    ctx: &mut RunContext,
    step: PipelineStep,
    outcome: StepOutcome<T>,
    step_started: Instant,
    run_started: Instant,
    budget: Option<Duration>,
) -> T {
    ctx.record_step(step, &outcome, step_started.elapsed());
    if let Some(reason) = outcome.reason() {
        tracing::warn!("[PIPELINE] Step {} degraded: {}", step, reason);
    }

    if let Some(limit) = budget {
        let elapsed = run_started.elapsed();
        if elapsed > limit {
            tracing::warn!(
                "[PIPELINE] Time budget of {}s exceeded after {} ({:.1}s elapsed), continuing",
                limit.as_secs(),
                step,
                elapsed.as_secs_f64()
            );
        }
    }

    outcome.into_value()
}
