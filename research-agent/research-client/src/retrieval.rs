/// Step 2: fetch candidate documents for the topic

use search_core::{DocumentSource, ResearchDocument};

use crate::context::{RunContext, StepOutcome};
use crate::models::ResearchTopic;

pub async fn retrieve_documents(
    source: &dyn DocumentSource,
    ctx: &mut RunContext,
    topic: &ResearchTopic,
) -> StepOutcome<Vec<ResearchDocument>> {
    match source.search(&topic.search_request()).await {
        Ok(documents) => {
            for document in &documents {
                ctx.register_document(document.clone());
            }
            tracing::info!("[RETRIEVE] {} documents from {}", documents.len(), source.name());
            StepOutcome::Completed(documents)
        }
        Err(e) => {
            tracing::error!("[RETRIEVE] Error retrieving documents from {}: {:#}", source.name(), e);
            StepOutcome::degraded(Vec::new(), format!("{} search failed: {:#}", source.name(), e))
        }
    }
}
