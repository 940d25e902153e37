/// Step 1: turn the query into a research topic

use chrono::Utc;

use crate::context::{PlanRecord, RunContext, StepOutcome};
use crate::models::{Depth, ResearchScope, ResearchTopic};
use crate::prompts::{get_planning_prompt, PLANNING_MAX_TOKENS, PLANNING_SYSTEM_PROMPT};
use crate::shared::reply::{string_list_field, StructuredReply};
use crate::shared::PromptedExtractor;

pub async fn create_research_plan(
    extractor: &PromptedExtractor<'_>,
    ctx: &mut RunContext,
    query: &str,
    depth: Depth,
) -> StepOutcome<ResearchTopic> {
    let prompt = get_planning_prompt(query, depth);
    match extractor.ask(PLANNING_SYSTEM_PROMPT, prompt, PLANNING_MAX_TOKENS).await {
        Ok(plan) => {
            let topic = topic_from_plan(&plan, query, next_topic_id());
            tracing::info!(
                "[PLAN] Topic {}: {} subtopics, {} keywords",
                topic.id,
                topic.subtopics.len(),
                topic.keywords.len()
            );
            ctx.register_plan(PlanRecord {
                plan,
                created_at: Utc::now(),
                topic: topic.clone(),
            });
            StepOutcome::Completed(topic)
        }
        Err(e) => {
            tracing::error!("[PLAN] Error creating research plan: {:#}", e);
            StepOutcome::degraded(fallback_topic(query), format!("planning request failed: {:#}", e))
        }
    }
}

fn next_topic_id() -> String {
    format!("topic_{}", Utc::now().timestamp())
}

/// Build a topic from a plan reply, defaulting each missing field
pub fn topic_from_plan(plan: &StructuredReply, query: &str, id: String) -> ResearchTopic {
    ResearchTopic {
        id,
        query: plan.text_or("main_query", query),
        subtopics: plan.strings_or("subtopics", default_subtopics(query)),
        keywords: plan.strings_or("keywords", default_keywords(query)),
        scope: scope_from_plan(plan),
    }
}

/// Minimal topic used when the planning request itself fails
pub fn fallback_topic(query: &str) -> ResearchTopic {
    ResearchTopic {
        id: next_topic_id(),
        query: query.to_string(),
        subtopics: vec![query.to_string()],
        keywords: default_keywords(query),
        scope: ResearchScope::default(),
    }
}

pub fn scope_from_plan(plan: &StructuredReply) -> ResearchScope {
    let defaults = ResearchScope::default();
    let Some(scope) = plan.object("scope") else {
        return defaults;
    };

    let time_range = match string_list_field(scope, "time_range").as_deref() {
        Some([start, .., end]) => (start.clone(), end.clone()),
        _ => defaults.time_range,
    };

    ResearchScope {
        time_range,
        domains: string_list_field(scope, "domains").unwrap_or(defaults.domains),
        excluded_areas: string_list_field(scope, "excluded_areas").unwrap_or(defaults.excluded_areas),
    }
}

/// The parts of the query before the first and after the last " and "
fn default_subtopics(query: &str) -> Vec<String> {
    let parts: Vec<&str> = query.split(" and ").collect();
    let first = parts.first().copied().unwrap_or(query).trim().to_string();
    let last = parts.last().copied().unwrap_or(query).trim().to_string();
    if first == last {
        vec![first]
    } else {
        vec![first, last]
    }
}

fn default_keywords(query: &str) -> Vec<String> {
    query.split_whitespace().map(str::to_string).collect()
}
