/// Step 6: have the model write the report, and persist it

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::{json, Value};

use crate::context::{RunContext, StepOutcome};
use crate::models::{ReportMetadata, ResearchReport, ResearchSynthesis};
use crate::prompts::{get_report_prompt, REPORT_MAX_TOKENS, REPORT_SYSTEM_PROMPT};
use crate::shared::StructuredReply;
use crate::shared::PromptedExtractor;

pub async fn format_research_output(
    extractor: &PromptedExtractor<'_>,
    ctx: &RunContext,
    synthesis: &ResearchSynthesis,
) -> StepOutcome<ResearchReport> {
    let prompt = get_report_prompt(&report_payload(synthesis, ctx));
    match extractor.ask(REPORT_SYSTEM_PROMPT, prompt, REPORT_MAX_TOKENS).await {
        Ok(reply) => StepOutcome::Completed(report_from_reply(&reply, synthesis)),
        Err(e) => {
            tracing::error!("[REPORT] Error formatting research output: {:#}", e);
            StepOutcome::degraded(fallback_report(synthesis), format!("report request failed: {:#}", e))
        }
    }
}

fn report_payload(synthesis: &ResearchSynthesis, ctx: &RunContext) -> Value {
    let sources: Vec<Value> = synthesis
        .document_coverage
        .iter()
        .filter_map(|id| ctx.document(id))
        .map(|doc| {
            json!({
                "title": doc.title,
                "authors": doc.authors,
                "publication": doc.source,
                "date": doc.publication_date,
                "url": doc.url,
            })
        })
        .collect();

    json!({
        "title": synthesis.title,
        "summary": synthesis.summary,
        "key_findings": synthesis.key_findings.iter().map(|f| f.content.as_str()).collect::<Vec<_>>(),
        "future_directions": synthesis.future_directions,
        "gaps": synthesis.gaps_identified,
        "sources": sources,
    })
}

pub fn report_from_reply(reply: &StructuredReply, synthesis: &ResearchSynthesis) -> ResearchReport {
    ResearchReport {
        title: reply.text_or("title", synthesis.title.clone()),
        executive_summary: reply.prose_or("executive_summary", synthesis.summary.clone()),
        introduction: reply.prose_or("introduction", format!("Introduction to {}", synthesis.title)),
        methodology: reply.prose_or("methodology", "Methodology section"),
        key_findings: reply.prose_or("key_findings", "Key findings section"),
        discussion: reply.prose_or("discussion", "Discussion section"),
        research_gaps: reply.prose_or("research_gaps", "Research gaps section"),
        future_directions: reply.prose_or("future_directions", "Future directions section"),
        conclusion: reply.prose_or("conclusion", "Conclusion section"),
        bibliography: reply.strings_or("bibliography", synthesis.bibliography.clone()),
        metadata: report_metadata(synthesis),
    }
}

/// Report assembled from the synthesis alone
pub fn fallback_report(synthesis: &ResearchSynthesis) -> ResearchReport {
    ResearchReport {
        title: synthesis.title.clone(),
        executive_summary: synthesis.summary.clone(),
        introduction: format!("Introduction to {}", synthesis.title),
        methodology: "This research was conducted through a systematic review of literature.".to_string(),
        key_findings: bullet_list(synthesis.key_findings.iter().map(|f| f.content.as_str())),
        discussion: "Discussion of the findings and their implications.".to_string(),
        research_gaps: bullet_list(synthesis.gaps_identified.iter().map(String::as_str)),
        future_directions: bullet_list(synthesis.future_directions.iter().map(String::as_str)),
        conclusion: format!(
            "In conclusion, this research on {} provides valuable insights.",
            synthesis.title
        ),
        bibliography: synthesis.bibliography.clone(),
        metadata: report_metadata(synthesis),
    }
}

fn bullet_list<'a>(items: impl Iterator<Item = &'a str>) -> String {
    items.map(|item| format!("- {}", item)).collect::<Vec<_>>().join("\n")
}

fn report_metadata(synthesis: &ResearchSynthesis) -> ReportMetadata {
    ReportMetadata {
        research_question: synthesis.title.clone(),
        document_count: synthesis.document_coverage.len(),
        finding_count: synthesis.key_findings.len(),
        generation_date: Utc::now().to_rfc3339(),
        research_id: synthesis.id.clone(),
    }
}

/// Write the report as pretty-printed JSON
pub fn write_report(path: impl AsRef<Path>, report: &ResearchReport) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).with_context(|| format!("Failed to write report to {}", path.display()))?;
    tracing::info!("[REPORT] Saved report to {}", path.display());
    Ok(())
}
