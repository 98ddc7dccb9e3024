//! Final response assembly

use super::prompts;
use super::step::{PromptRunner, SynthesisStep};
use crate::domain::analysis::ContextAnalysis;
use crate::domain::decision::{DecisionRecord, FinalResponse};
use crate::domain::query::StructuredQuery;
use crate::domain::DomainError;

/// Builds the justification list and asks the model for the narrative
#[derive(Debug, Clone)]
pub struct ResponseAssembler {
    runner: PromptRunner,
}

impl ResponseAssembler {
    pub fn new(runner: PromptRunner) -> Self {
        Self { runner }
    }

    pub async fn assemble(
        &self,
        record: &DecisionRecord,
        analysis: &ContextAnalysis,
        structured: &StructuredQuery,
        query: &str,
    ) -> Result<FinalResponse, DomainError> {
        let justification = build_justification(record, analysis, &structured.subject);

        let narrative = self
            .runner
            .run(
                SynthesisStep::Narrative,
                prompts::narrative_prompt(query, record),
            )
            .await?;

        Ok(FinalResponse::new(
            record.decision(),
            Some(record.amount_covered()),
            justification,
            narrative,
        ))
    }
}

/// Reason, detail, then the analyzer agreement sentence; a generic sentence
/// about `subject` when all three are absent
pub fn build_justification(
    record: &DecisionRecord,
    analysis: &ContextAnalysis,
    subject: &str,
) -> Vec<String> {
    let mut justification: Vec<String> = [record.main_reason(), record.supporting_detail()]
        .into_iter()
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    if let Some(sentence) = analysis.agreement_sentence(record.decision()) {
        justification.push(sentence.to_string());
    }

    if justification.is_empty() {
        justification.push(format!(
            "Based on review of the policy sections related to {}",
            subject
        ));
    }

    justification
}
