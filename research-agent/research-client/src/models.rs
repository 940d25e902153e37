/// Records produced and consumed by the research pipeline

use std::fmt;

use serde::{Deserialize, Serialize};

use search_core::SearchRequest;

/// How thorough the plan should be; forwarded to the planning prompt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    Quick,
    Standard,
    #[default]
    Comprehensive,
}

impl Depth {
    pub fn as_str(&self) -> &'static str {
        match self {
            Depth::Quick => "quick",
            Depth::Standard => "standard",
            Depth::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchScope {
    /// [start_year, end_year]
    pub time_range: (String, String),
    pub domains: Vec<String>,
    pub excluded_areas: Vec<String>,
}

impl Default for ResearchScope {
    fn default() -> Self {
        Self {
            time_range: ("2020".to_string(), "2023".to_string()),
            domains: vec!["General".to_string()],
            excluded_areas: Vec::new(),
        }
    }
}

/// A research question broken down by the planning step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchTopic {
    pub id: String,
    pub query: String,
    pub subtopics: Vec<String>,
    pub keywords: Vec<String>,
    pub scope: ResearchScope,
}

impl ResearchTopic {
    pub fn search_request(&self) -> SearchRequest {
        SearchRequest {
            query: self.query.clone(),
            subtopics: self.subtopics.clone(),
            keywords: self.keywords.clone(),
            time_range: self.scope.time_range.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchFinding {
    pub id: String,
    pub content: String,
    /// Document ids
    pub source_documents: Vec<String>,
    pub confidence: f64,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchSynthesis {
    pub id: String,
    pub title: String,
    pub summary: String,
    pub key_findings: Vec<ResearchFinding>,
    /// Document ids
    pub document_coverage: Vec<String>,
    pub gaps_identified: Vec<String>,
    pub future_directions: Vec<String>,
    pub bibliography: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub research_question: String,
    pub document_count: usize,
    pub finding_count: usize,
    pub generation_date: String,
    pub research_id: String,
}

/// Final report written at the end of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchReport {
    pub title: String,
    pub executive_summary: String,
    pub introduction: String,
    pub methodology: String,
    pub key_findings: String,
    pub discussion: String,
    pub research_gaps: String,
    pub future_directions: String,
    pub conclusion: String,
    pub bibliography: Vec<String>,
    pub metadata: ReportMetadata,
}
