//! Four-step decision synthesis over retrieved policy text

use tracing::info;

use super::prompts;
use super::step::{PromptRunner, SynthesisStep};
use crate::domain::decision::{normalize_reason, parse_amount, DecisionRecord, DecisionStatus};
use crate::domain::DomainError;

/// Derives a [`DecisionRecord`] through sequential, narrowly scoped prompts.
///
/// Each step's reply is parsed with a safe default, so only a failed model
/// call makes synthesis fail. There is no partial result.
#[derive(Debug, Clone)]
pub struct DecisionSynthesizer {
    runner: PromptRunner,
}

impl DecisionSynthesizer {
    pub fn new(runner: PromptRunner) -> Self {
        Self { runner }
    }

    pub async fn synthesize(&self, context: &str, query: &str) -> Result<DecisionRecord, DomainError> {
        let decision = self.status(context, query).await?;
        let amount = self.amount(context, query).await?;
        let reason = self.reason(context, query, decision).await?;
        let detail = self.detail(context, query).await?;

        info!(
            decision = %decision,
            amount_covered = amount,
            model = self.runner.model(),
            "Decision synthesized"
        );

        Ok(DecisionRecord::new(decision, amount, reason, detail))
    }

    async fn status(&self, context: &str, query: &str) -> Result<DecisionStatus, DomainError> {
        let reply = self
            .runner
            .run(SynthesisStep::Status, prompts::status_prompt(query, context))
            .await?;
        Ok(DecisionStatus::from_model_output(&reply))
    }

    async fn amount(&self, context: &str, query: &str) -> Result<f64, DomainError> {
        let reply = self
            .runner
            .run(SynthesisStep::Amount, prompts::amount_prompt(query, context))
            .await?;
        Ok(parse_amount(&reply))
    }

    async fn reason(
        &self,
        context: &str,
        query: &str,
        decision: DecisionStatus,
    ) -> Result<String, DomainError> {
        let reply = self
            .runner
            .run(
                SynthesisStep::Reason,
                prompts::reason_prompt(query, context, decision),
            )
            .await?;
        Ok(normalize_reason(&reply))
    }

    async fn detail(&self, context: &str, query: &str) -> Result<String, DomainError> {
        self.runner
            .run(SynthesisStep::Detail, prompts::detail_prompt(query, context))
            .await
    }
}
