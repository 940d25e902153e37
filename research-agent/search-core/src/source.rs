/// Document source seam

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::document::ResearchDocument;

/// What the pipeline knows about a topic when it asks for documents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    pub subtopics: Vec<String>,
    pub keywords: Vec<String>,
    /// Inclusive (start, end) years
    pub time_range: (String, String),
}

/// Given a topic, return a sequence of candidate documents
#[async_trait]
pub trait DocumentSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn search(&self, request: &SearchRequest) -> Result<Vec<ResearchDocument>>;
}
