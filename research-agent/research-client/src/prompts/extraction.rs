/// Extraction prompt: pulls findings, methods and limitations out of one document

use search_core::ResearchDocument;

use crate::models::ResearchTopic;

pub const EXTRACTION_SYSTEM_PROMPT: &str =
    "You are a research analysis assistant that extracts key information from academic papers.";

pub const EXTRACTION_MAX_TOKENS: u32 = 2500;

/// Document content beyond this many characters is not sent
pub const MAX_DOCUMENT_CHARS: usize = 8000;

pub fn get_extraction_prompt(document: &ResearchDocument, topic: &ResearchTopic) -> String {
    let content: String = document.content.chars().take(MAX_DOCUMENT_CHARS).collect();
    format!(
        r#"Extract key information and findings from the following research document.

DOCUMENT TITLE: {}
AUTHORS: {}
PUBLICATION: {} ({})

CONTENT:
{}

RESEARCH QUESTION:
{}

RELEVANT SUBTOPICS:
{}

Extract the following:
1. Key findings or claims made in the document
2. Evidence provided to support these findings
3. Methodologies used
4. Limitations mentioned
5. How the findings relate to our research question

Format your response as a valid JSON object with the following structure:
{{
    "key_findings": [
        {{
            "finding": "Description of finding",
            "evidence": "Evidence provided",
            "relevance": "Relevance to research question",
            "confidence": 0.95
        }}
    ],
    "methodologies": ["methodology1", "methodology2"],
    "limitations": ["limitation1", "limitation2"],
    "research_gaps": ["gap1", "gap2"]
}}
"confidence" is a value between 0 and 1 describing how sure you are of the extraction."#,
        document.title,
        document.authors.join(", "),
        document.source,
        document.publication_date,
        content,
        topic.query,
        topic.subtopics.join(", ")
    )
}
