/// Step 3: ask the model for the key findings of every document

use anyhow::Result;
use chrono::Utc;

use search_core::ResearchDocument;

use crate::context::{RunContext, StepOutcome};
use crate::models::{ResearchFinding, ResearchTopic};
use crate::prompts::{get_extraction_prompt, EXTRACTION_MAX_TOKENS, EXTRACTION_SYSTEM_PROMPT};
use crate::shared::reply::{number_field, text_field, StructuredReply};
use crate::shared::PromptedExtractor;

pub const DEFAULT_FINDING_CONFIDENCE: f64 = 0.7;

pub async fn extract_information(
    extractor: &PromptedExtractor<'_>,
    ctx: &mut RunContext,
    documents: &[ResearchDocument],
    topic: &ResearchTopic,
) -> StepOutcome<Vec<ResearchFinding>> {
    if documents.is_empty() {
        tracing::warn!("[EXTRACT] No documents to extract information from");
        return StepOutcome::degraded(Vec::new(), "no documents to extract from");
    }

    match extract_all(extractor, ctx, documents, topic).await {
        Ok(findings) => {
            tracing::info!("[EXTRACT] {} findings from {} documents", findings.len(), documents.len());
            StepOutcome::Completed(findings)
        }
        Err(e) => {
            tracing::error!("[EXTRACT] Error extracting information: {:#}", e);
            StepOutcome::degraded(
                vec![fallback_finding(documents, topic)],
                format!("extraction request failed: {:#}", e),
            )
        }
    }
}

async fn extract_all(
    extractor: &PromptedExtractor<'_>,
    ctx: &mut RunContext,
    documents: &[ResearchDocument],
    topic: &ResearchTopic,
) -> Result<Vec<ResearchFinding>> {
    let mut findings = Vec::new();
    for document in documents {
        tracing::debug!("[EXTRACT] Document {} ({})", document.id, document.title);
        let reply = extractor
            .ask(
                EXTRACTION_SYSTEM_PROMPT,
                get_extraction_prompt(document, topic),
                EXTRACTION_MAX_TOKENS,
            )
            .await?;

        for finding in findings_from_reply(&reply, document, topic) {
            ctx.register_finding(finding.clone());
            findings.push(finding);
        }
    }
    Ok(findings)
}

/// Findings for one document; a reply without `key_findings` yields a
/// single generic finding
pub fn findings_from_reply(
    reply: &StructuredReply,
    document: &ResearchDocument,
    topic: &ResearchTopic,
) -> Vec<ResearchFinding> {
    let mut extracted: Vec<(String, f64)> = reply
        .objects("key_findings")
        .into_iter()
        .map(|item| {
            let content = text_field(item, "finding").unwrap_or_else(|| "No finding specified".to_string());
            let confidence = number_field(item, "confidence")
                .unwrap_or(DEFAULT_FINDING_CONFIDENCE)
                .clamp(0.0, 1.0);
            (content, confidence)
        })
        .collect();

    if extracted.is_empty() {
        extracted.push((
            format!("The document discusses {}.", topic.query),
            DEFAULT_FINDING_CONFIDENCE,
        ));
    }

    extracted
        .into_iter()
        .enumerate()
        .map(|(i, (content, confidence))| ResearchFinding {
            id: format!("finding_{}_{}", document.id, i),
            tags: tags_for(&content, topic),
            content,
            source_documents: vec![document.id.clone()],
            confidence,
        })
        .collect()
}

/// The query, plus every subtopic mentioned in the finding text
pub fn tags_for(content: &str, topic: &ResearchTopic) -> Vec<String> {
    let lowered = content.to_lowercase();
    std::iter::once(topic.query.clone())
        .chain(
            topic
                .subtopics
                .iter()
                .filter(|subtopic| lowered.contains(&subtopic.to_lowercase()))
                .cloned(),
        )
        .collect()
}

fn fallback_finding(documents: &[ResearchDocument], topic: &ResearchTopic) -> ResearchFinding {
    ResearchFinding {
        id: format!("finding_fallback_{}", Utc::now().timestamp()),
        content: format!("General information about {}", topic.query),
        source_documents: documents.iter().take(1).map(|d| d.id.clone()).collect(),
        confidence: 0.5,
        tags: vec![topic.query.clone()],
    }
}
