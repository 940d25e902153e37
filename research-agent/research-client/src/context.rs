/// Run context: everything one pipeline invocation accumulates
///
/// Registries are append-only. The first record stored under an id wins;
/// nothing is updated or removed, and nothing outlives the run.

use std::collections::HashMap;
use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use search_core::ResearchDocument;

use crate::models::{ResearchFinding, ResearchSynthesis, ResearchTopic};
use crate::shared::StructuredReply;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineStep {
    Plan,
    Retrieve,
    Extract,
    Synthesize,
    Insights,
    Report,
}

impl PipelineStep {
    pub const ALL: [PipelineStep; 6] = [
        PipelineStep::Plan,
        PipelineStep::Retrieve,
        PipelineStep::Extract,
        PipelineStep::Synthesize,
        PipelineStep::Insights,
        PipelineStep::Report,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStep::Plan => "plan",
            PipelineStep::Retrieve => "retrieve",
            PipelineStep::Extract => "extract",
            PipelineStep::Synthesize => "synthesize",
            PipelineStep::Insights => "insights",
            PipelineStep::Report => "report",
        }
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of one step: either real data, or a default substituted because
/// the step could not produce any
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome<T> {
    Completed(T),
    Degraded { value: T, reason: String },
}

impl<T> StepOutcome<T> {
    pub fn degraded(value: T, reason: impl Into<String>) -> Self {
        StepOutcome::Degraded {
            value,
            reason: reason.into(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, StepOutcome::Degraded { .. })
    }

    pub fn value(&self) -> &T {
        match self {
            StepOutcome::Completed(value) | StepOutcome::Degraded { value, .. } => value,
        }
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            StepOutcome::Completed(_) => None,
            StepOutcome::Degraded { reason, .. } => Some(reason),
        }
    }

    pub fn into_value(self) -> T {
        match self {
            StepOutcome::Completed(value) | StepOutcome::Degraded { value, .. } => value,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    Completed,
    Degraded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: PipelineStep,
    pub status: StepStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub elapsed_ms: u64,
}

/// A parsed research plan as the model returned it
#[derive(Debug, Clone)]
pub struct PlanRecord {
    pub plan: StructuredReply,
    pub created_at: DateTime<Utc>,
    pub topic: ResearchTopic,
}

#[derive(Debug, Default)]
pub struct RunContext {
    plans: HashMap<String, PlanRecord>,
    documents: HashMap<String, ResearchDocument>,
    findings: HashMap<String, ResearchFinding>,
    syntheses: HashMap<String, ResearchSynthesis>,
    steps: Vec<StepRecord>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a plan under its topic id; false if the id was already taken
    pub fn register_plan(&mut self, record: PlanRecord) -> bool {
        insert_once(&mut self.plans, record.topic.id.clone(), record, "plan")
    }

    pub fn register_document(&mut self, document: ResearchDocument) -> bool {
        insert_once(&mut self.documents, document.id.clone(), document, "document")
    }

    pub fn register_finding(&mut self, finding: ResearchFinding) -> bool {
        insert_once(&mut self.findings, finding.id.clone(), finding, "finding")
    }

    pub fn register_synthesis(&mut self, synthesis: ResearchSynthesis) -> bool {
        insert_once(&mut self.syntheses, synthesis.id.clone(), synthesis, "synthesis")
    }

    pub fn document(&self, id: &str) -> Option<&ResearchDocument> {
        self.documents.get(id)
    }

    pub fn has_document(&self, id: &str) -> bool {
        self.documents.contains_key(id)
    }

    pub fn plans(&self) -> &HashMap<String, PlanRecord> {
        &self.plans
    }

    pub fn documents(&self) -> &HashMap<String, ResearchDocument> {
        &self.documents
    }

    pub fn findings(&self) -> &HashMap<String, ResearchFinding> {
        &self.findings
    }

    pub fn syntheses(&self) -> &HashMap<String, ResearchSynthesis> {
        &self.syntheses
    }

    pub fn record_step<T>(&mut self, step: PipelineStep, outcome: &StepOutcome<T>, elapsed: Duration) {
        self.steps.push(StepRecord {
            step,
            status: if outcome.is_degraded() {
                StepStatus::Degraded
            } else {
                StepStatus::Completed
            },
            reason: outcome.reason().map(str::to_string),
            elapsed_ms: elapsed.as_millis() as u64,
        });
    }

    pub fn steps(&self) -> &[StepRecord] {
        &self.steps
    }

    pub fn degraded_steps(&self) -> Vec<PipelineStep> {
        self.steps
            .iter()
            .filter(|record| record.status == StepStatus::Degraded)
            .map(|record| record.step)
            .collect()
    }
}

fn insert_once<V>(registry: &mut HashMap<String, V>, id: String, value: V, kind: &str) -> bool {
    if registry.contains_key(&id) {
        tracing::debug!("[CONTEXT] {} {} already registered, keeping the first", kind, id);
        return false;
    }
    registry.insert(id, value);
    true
}
