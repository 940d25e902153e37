#![allow(dead_code)]

/// Shared fixtures for integration tests
/// Scripted generators and a fixed document source

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use research_client::prompts::{
    EXTRACTION_SYSTEM_PROMPT, INSIGHT_SYSTEM_PROMPT, PLANNING_SYSTEM_PROMPT, REPORT_SYSTEM_PROMPT,
    SYNTHESIS_SYSTEM_PROMPT,
};
use research_client::{CompletionRequest, TextGenerator};
use search_core::{DocumentSource, ResearchDocument, SearchRequest};

pub const TEST_MODEL: &str = "test-model";

/// Replies chosen by system prompt; anything unscripted gets `default_reply`
pub struct ScriptedGenerator {
    replies: HashMap<String, String>,
    default_reply: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGenerator {
    pub fn new(default_reply: impl Into<String>) -> Self {
        Self {
            replies: HashMap::new(),
            default_reply: default_reply.into(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn reply_to(mut self, system: &str, reply: impl Into<String>) -> Self {
        self.replies.insert(system.to_string(), reply.into());
        self
    }

    /// A well-behaved model for every step
    pub fn cooperative() -> Self {
        Self::new("{}")
            .reply_to(PLANNING_SYSTEM_PROMPT, PLAN_REPLY)
            .reply_to(EXTRACTION_SYSTEM_PROMPT, EXTRACTION_REPLY)
            .reply_to(SYNTHESIS_SYSTEM_PROMPT, SYNTHESIS_REPLY)
            .reply_to(INSIGHT_SYSTEM_PROMPT, INSIGHT_REPLY)
            .reply_to(REPORT_SYSTEM_PROMPT, REPORT_REPLY)
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count_for(&self, system: &str) -> usize {
        self.requests.lock().unwrap().iter().filter(|r| r.system == system).count()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, request: &CompletionRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self
            .replies
            .get(&request.system)
            .cloned()
            .unwrap_or_else(|| self.default_reply.clone()))
    }
}

/// Every call fails the way an unreachable API would
pub struct FailingGenerator;

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn generate(&self, _request: &CompletionRequest) -> Result<String> {
        Err(anyhow!("connection refused"))
    }
}

pub struct StaticSource {
    pub documents: Vec<ResearchDocument>,
}

#[async_trait]
impl DocumentSource for StaticSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn search(&self, _request: &SearchRequest) -> Result<Vec<ResearchDocument>> {
        Ok(self.documents.clone())
    }
}

pub struct FailingSource;

#[async_trait]
impl DocumentSource for FailingSource {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn search(&self, _request: &SearchRequest) -> Result<Vec<ResearchDocument>> {
        Err(anyhow!("search backend unavailable"))
    }
}

pub fn document(id: &str, title: &str) -> ResearchDocument {
    ResearchDocument {
        id: id.to_string(),
        title: title.to_string(),
        authors: vec!["Ada Lovelace".to_string(), "Alan Turing".to_string()],
        publication_date: "2023-05".to_string(),
        source: "Journal of Testing".to_string(),
        content: format!("Abstract: {title}. Introduction: body text about {title}."),
        abstract_text: title.to_string(),
        url: None,
        citation: None,
        relevance_score: Some(0.9),
    }
}

pub fn two_documents() -> StaticSource {
    StaticSource {
        documents: vec![
            document("doc_a", "Qubit Error Correction"),
            document("doc_b", "Quantum Machine Learning"),
        ],
    }
}

pub const PLAN_REPLY: &str = r#"Here is the plan:
```json
{
  "main_query": "quantum computing and AI",
  "subtopics": ["quantum computing", "AI"],
  "keywords": ["qubit", "machine learning"],
  "scope": {"time_range": [2019, 2024], "domains": ["Physics", "Computer Science"], "excluded_areas": []}
}
```"#;

pub const EXTRACTION_REPLY: &str =
    r#"{"key_findings": [{"finding": "Quantum computing speeds up sampling.", "confidence": 0.92, "page_reference": "p. 3"}]}"#;

pub const SYNTHESIS_REPLY: &str = r#"Synthesis follows.
{
  "title": "Quantum Computing Meets AI",
  "executive_summary": "Quantum hardware is maturing.",
  "synthesis_by_subtopic": [
    {"subtopic": "quantum computing", "synthesis": "Error rates fall.", "key_insights": ["Logical qubits are near.", "Noise remains the bottleneck."]}
  ],
  "research_gaps": ["Benchmarks are missing."],
  "future_directions": ["Hybrid algorithms."]
}"#;

pub const INSIGHT_REPLY: &str = r#"```
{"deeper_patterns": ["Hardware and algorithms co-evolve."], "practical_applications": ["Drug discovery."], "enhanced_future_directions": ["Fault-tolerant hybrid training."]}
```"#;

pub const REPORT_REPLY: &str = r#"{
  "title": "Quantum Computing and AI: A Review",
  "executive_summary": "Quantum computing is approaching practical use.",
  "methodology": "Literature review.",
  "key_findings": ["Logical qubits are near.", "Noise remains the bottleneck."],
  "conclusion": "Progress is steady.",
  "bibliography": ["Lovelace, A. (2023). Qubit Error Correction. Journal of Testing."]
}"#;
