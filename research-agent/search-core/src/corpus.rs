/// Generated corpus: fabricates a small set of papers for every subtopic
/// when no search backend is configured

use anyhow::Result;
use async_trait::async_trait;

use crate::document::{title_case, ResearchDocument};
use crate::source::{DocumentSource, SearchRequest};

/// Documents fabricated per subtopic unless overridden
pub const DEFAULT_DOCUMENTS_PER_SUBTOPIC: usize = 2;

#[derive(Debug, Clone)]
pub struct GeneratedCorpus {
    documents_per_subtopic: usize,
}

impl Default for GeneratedCorpus {
    fn default() -> Self {
        Self {
            documents_per_subtopic: DEFAULT_DOCUMENTS_PER_SUBTOPIC,
        }
    }
}

impl GeneratedCorpus {
    pub fn new(documents_per_subtopic: usize) -> Self {
        Self {
            documents_per_subtopic,
        }
    }

    /// Build the corpus for a request, stamping ids with `stamp`
    pub fn generate(&self, request: &SearchRequest, stamp: i64) -> Vec<ResearchDocument> {
        let mut documents = Vec::with_capacity(request.subtopics.len() * self.documents_per_subtopic);
        for (i, subtopic) in request.subtopics.iter().enumerate() {
            for j in 0..self.documents_per_subtopic {
                documents.push(fabricate_document(request, subtopic, i, j, stamp));
            }
        }
        documents
    }
}

#[async_trait]
impl DocumentSource for GeneratedCorpus {
    fn name(&self) -> &'static str {
        "generated-corpus"
    }

    async fn search(&self, request: &SearchRequest) -> Result<Vec<ResearchDocument>> {
        let documents = self.generate(request, chrono::Utc::now().timestamp());
        tracing::info!(
            "[CORPUS] Generated {} documents for {} subtopics",
            documents.len(),
            request.subtopics.len()
        );
        Ok(documents)
    }
}

/// Keyword at `index`, clamped to the last keyword; the subtopic stands in
/// when the plan produced no keywords
fn keyword_at<'a>(keywords: &'a [String], index: usize, subtopic: &'a str) -> &'a str {
    match keywords.len() {
        0 => subtopic,
        len => &keywords[index.min(len - 1)],
    }
}

fn fabricate_document(
    request: &SearchRequest,
    subtopic: &str,
    i: usize,
    j: usize,
    stamp: i64,
) -> ResearchDocument {
    let id = format!("doc_{}_{}_{}", stamp, i, j);
    let keyword = keyword_at(&request.keywords, i, subtopic);
    let keyword2 = keyword_at(&request.keywords, i + 1, subtopic);
    let keyword3 = keyword_at(&request.keywords, i + 2, subtopic);
    let (start_year, end_year) = &request.time_range;
    let query = &request.query;

    let content = [
        "Abstract:".to_string(),
        format!("This research explores {subtopic} in detail, with a focus on recent developments."),
        format!("We analyze the implications of {keyword} on various aspects of {subtopic}."),
        String::new(),
        "Introduction:".to_string(),
        format!("The field of {subtopic} has seen significant advancement in recent years."),
        "This paper provides an overview of the current state of research and identifies future directions.".to_string(),
        format!("We begin by examining the fundamental concepts related to {keyword}."),
        String::new(),
        "Methodology:".to_string(),
        format!("We ran a systematic review of literature published between {start_year} and {end_year}."),
        "Over 50 papers from leading journals in the field were analyzed.".to_string(),
        String::new(),
        "Findings:".to_string(),
        format!("First, {subtopic} is increasingly recognized as critical in understanding {query}."),
        format!("Second, the connection between {subtopic} and {keyword2} appears stronger than previously thought."),
        String::new(),
        "Discussion:".to_string(),
        format!("Future research should explore the relationship between {subtopic} and {keyword3}."),
        format!("Significant gaps remain in how {subtopic} affects practical applications."),
        String::new(),
        "Conclusion:".to_string(),
        format!("This research contributes to the body of knowledge on {query} and highlights the importance of {subtopic}."),
    ]
    .join("\n");

    let abstract_text = section_between(&content, "Abstract:", "Introduction:")
        .unwrap_or_else(|| content.chars().take(200).collect());
    let subtopic_title = title_case(subtopic);

    ResearchDocument {
        title: format!("Analysis of {} in the Context of {}", subtopic_title, query),
        authors: (1..=3).map(|n| format!("Author {}", j + n)).collect(),
        publication_date: format!("202{}-{:02}", j, (i + 1) % 12 + 1),
        source: format!("Journal of {} Research", subtopic_title),
        url: Some(format!("https://example.org/papers/{}", id)),
        relevance_score: Some(0.8 + j as f64 * 0.1),
        citation: None,
        abstract_text,
        content,
        id,
    }
}

fn section_between(content: &str, start: &str, end: &str) -> Option<String> {
    let after = content.split_once(start)?.1;
    let section = after.split_once(end)?.0;
    Some(section.trim().to_string())
}
