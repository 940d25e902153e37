/// Step 4: merge the per-document findings into one synthesis

use std::collections::HashSet;

use chrono::Utc;
use serde_json::{json, Value};

use crate::context::{RunContext, StepOutcome};
use crate::models::{ResearchFinding, ResearchSynthesis, ResearchTopic};
use crate::prompts::{get_synthesis_prompt, SYNTHESIS_MAX_TOKENS, SYNTHESIS_SYSTEM_PROMPT};
use crate::shared::reply::{string_list_field, text_field, StructuredReply};
use crate::shared::PromptedExtractor;

/// One entry of `synthesis_by_subtopic`
#[derive(Debug, Clone, PartialEq)]
pub struct SubtopicSynthesis {
    pub subtopic: String,
    pub synthesis: String,
    pub key_insights: Vec<String>,
}

pub async fn synthesize_findings(
    extractor: &PromptedExtractor<'_>,
    ctx: &mut RunContext,
    findings: &[ResearchFinding],
    topic: &ResearchTopic,
) -> StepOutcome<ResearchSynthesis> {
    if findings.is_empty() {
        tracing::warn!("[SYNTHESIZE] No findings to synthesize");
        return StepOutcome::degraded(default_synthesis(topic), "no findings to synthesize");
    }

    let findings_data = findings_payload(findings, ctx);
    if findings_data.is_empty() {
        tracing::warn!("[SYNTHESIZE] No findings reference a retrieved document");
        return StepOutcome::degraded(default_synthesis(topic), "no findings reference a retrieved document");
    }

    let prompt = get_synthesis_prompt(&topic.query, &topic.subtopics, &Value::Array(findings_data));
    match extractor.ask(SYNTHESIS_SYSTEM_PROMPT, prompt, SYNTHESIS_MAX_TOKENS).await {
        Ok(reply) => {
            let id = format!("synthesis_{}", Utc::now().timestamp());
            let synthesis = synthesis_from_reply(&reply, findings, topic, ctx, id);
            tracing::info!(
                "[SYNTHESIZE] {} key findings across {} documents",
                synthesis.key_findings.len(),
                synthesis.document_coverage.len()
            );
            ctx.register_synthesis(synthesis.clone());
            StepOutcome::Completed(synthesis)
        }
        Err(e) => {
            tracing::error!("[SYNTHESIZE] Error synthesizing findings: {:#}", e);
            StepOutcome::degraded(default_synthesis(topic), format!("synthesis request failed: {:#}", e))
        }
    }
}

/// What the model sees for each finding whose first source was retrieved
fn findings_payload(findings: &[ResearchFinding], ctx: &RunContext) -> Vec<Value> {
    findings
        .iter()
        .filter_map(|finding| {
            let document = ctx.document(finding.source_documents.first()?)?;
            Some(json!({
                "finding": finding.content,
                "source": document.title,
                "authors": document.authors.join(", "),
                "publication_date": document.publication_date,
                "confidence": finding.confidence,
            }))
        })
        .collect()
}

/// Distinct retrieved document ids referenced by `findings`, first-seen order
pub fn covered_documents(findings: &[ResearchFinding], ctx: &RunContext) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut covered = Vec::new();
    for id in findings.iter().flat_map(|finding| finding.source_documents.iter()) {
        if ctx.has_document(id) && seen.insert(id.as_str()) {
            covered.push(id.clone());
        }
    }
    covered
}

pub fn subtopic_syntheses(reply: &StructuredReply, topic: &ResearchTopic) -> Vec<SubtopicSynthesis> {
    let parsed: Vec<SubtopicSynthesis> = reply
        .objects("synthesis_by_subtopic")
        .into_iter()
        .map(|item| SubtopicSynthesis {
            subtopic: text_field(item, "subtopic").unwrap_or_else(|| "General".to_string()),
            synthesis: text_field(item, "synthesis").unwrap_or_default(),
            key_insights: string_list_field(item, "key_insights").unwrap_or_default(),
        })
        .collect();

    if !parsed.is_empty() {
        return parsed;
    }

    topic
        .subtopics
        .iter()
        .map(|subtopic| SubtopicSynthesis {
            subtopic: subtopic.clone(),
            synthesis: format!("Analysis of {} in relation to {}.", subtopic, topic.query),
            key_insights: vec![format!("Key insight about {}.", subtopic)],
        })
        .collect()
}

pub fn synthesis_from_reply(
    reply: &StructuredReply,
    findings: &[ResearchFinding],
    topic: &ResearchTopic,
    ctx: &RunContext,
    id: String,
) -> ResearchSynthesis {
    let document_ids = covered_documents(findings, ctx);

    let mut key_findings: Vec<ResearchFinding> = subtopic_syntheses(reply, topic)
        .iter()
        .enumerate()
        .flat_map(|(i, entry)| {
            let document_ids = &document_ids;
            entry.key_insights.iter().enumerate().map(move |(j, insight)| ResearchFinding {
                id: format!("syn_finding_{}_{}", i, j),
                content: insight.clone(),
                source_documents: document_ids.clone(),
                confidence: 0.9,
                tags: vec![entry.subtopic.clone()],
            })
        })
        .collect();

    if key_findings.is_empty() {
        key_findings.push(ResearchFinding {
            id: "syn_finding_default".to_string(),
            content: format!("General insight about {}.", topic.query),
            source_documents: document_ids.clone(),
            confidence: 0.7,
            tags: vec!["General".to_string()],
        });
    }

    let bibliography = document_ids
        .iter()
        .filter_map(|doc_id| ctx.document(doc_id))
        .map(|document| document.format_citation())
        .collect();

    ResearchSynthesis {
        id,
        title: reply.text_or("title", format!("Research on {}", topic.query)),
        summary: reply.text_or("executive_summary", format!("Summary of research on {}.", topic.query)),
        key_findings,
        gaps_identified: reply.strings_or(
            "research_gaps",
            vec![format!("Further research needed on {}.", topic.query)],
        ),
        future_directions: reply.strings_or(
            "future_directions",
            vec!["Expand the scope of research.".to_string()],
        ),
        document_coverage: document_ids,
        bibliography,
    }
}

/// Synthesis used when there is nothing to synthesize or the request fails
pub fn default_synthesis(topic: &ResearchTopic) -> ResearchSynthesis {
    let stamp = Utc::now().timestamp();
    ResearchSynthesis {
        id: format!("synthesis_default_{}", stamp),
        title: format!("Research on {}", topic.query),
        summary: format!("This is a default synthesis for {}.", topic.query),
        key_findings: vec![ResearchFinding {
            id: format!("default_finding_{}", stamp),
            content: format!("General information about {}.", topic.query),
            source_documents: Vec::new(),
            confidence: 0.5,
            tags: vec!["General".to_string()],
        }],
        document_coverage: Vec::new(),
        gaps_identified: vec![format!("More research needed on {}.", topic.query)],
        future_directions: vec!["Expand the scope of research.".to_string()],
        bibliography: Vec::new(),
    }
}
