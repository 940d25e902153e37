/// Step 5: ask for patterns and applications the synthesis does not state

use serde_json::json;

use crate::context::{RunContext, StepOutcome};
use crate::models::{ResearchFinding, ResearchSynthesis, ResearchTopic};
use crate::prompts::{get_insight_prompt, INSIGHT_MAX_TOKENS, INSIGHT_SYSTEM_PROMPT};
use crate::shared::reply::StructuredReply;
use crate::shared::PromptedExtractor;

pub async fn generate_insights(
    extractor: &PromptedExtractor<'_>,
    ctx: &mut RunContext,
    synthesis: ResearchSynthesis,
    topic: &ResearchTopic,
) -> StepOutcome<ResearchSynthesis> {
    let synthesis_data = json!({
        "title": synthesis.title,
        "summary": synthesis.summary,
        "key_findings": synthesis.key_findings.iter().map(|f| f.content.as_str()).collect::<Vec<_>>(),
        "gaps": synthesis.gaps_identified,
        "future_directions": synthesis.future_directions,
    });

    let prompt = get_insight_prompt(&topic.query, &synthesis_data);
    match extractor.ask(INSIGHT_SYSTEM_PROMPT, prompt, INSIGHT_MAX_TOKENS).await {
        Ok(reply) => {
            let enhanced = enhance_synthesis(&reply, &synthesis, ctx);
            tracing::info!(
                "[INSIGHTS] Added {} insight findings",
                enhanced.key_findings.len() - synthesis.key_findings.len()
            );
            StepOutcome::Completed(enhanced)
        }
        Err(e) => {
            tracing::error!("[INSIGHTS] Error generating insights: {:#}", e);
            StepOutcome::degraded(synthesis, format!("insight request failed: {:#}", e))
        }
    }
}

/// Copy of `synthesis` with insight findings appended (and registered) and
/// future directions replaced when the reply offers enhanced ones
pub fn enhance_synthesis(
    reply: &StructuredReply,
    synthesis: &ResearchSynthesis,
    ctx: &mut RunContext,
) -> ResearchSynthesis {
    let mut enhanced = synthesis.clone();
    enhanced.future_directions = reply.strings_or("enhanced_future_directions", synthesis.future_directions.clone());

    let patterns = reply.strings_or("deeper_patterns", Vec::new());
    let applications = reply.strings_or("practical_applications", Vec::new());

    let new_findings = patterns
        .into_iter()
        .enumerate()
        .map(|(i, pattern)| insight_finding(format!("pattern_finding_{}", i), pattern, 0.85, "pattern", synthesis))
        .chain(applications.into_iter().enumerate().map(|(i, application)| {
            insight_finding(
                format!("application_finding_{}", i),
                application,
                0.8,
                "application",
                synthesis,
            )
        }));

    for finding in new_findings {
        ctx.register_finding(finding.clone());
        enhanced.key_findings.push(finding);
    }
    enhanced
}

fn insight_finding(
    id: String,
    content: String,
    confidence: f64,
    kind: &str,
    synthesis: &ResearchSynthesis,
) -> ResearchFinding {
    ResearchFinding {
        id,
        content,
        source_documents: synthesis.document_coverage.clone(),
        confidence,
        tags: vec![kind.to_string(), "insight".to_string()],
    }
}
