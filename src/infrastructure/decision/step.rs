//! Single model invocation shared by the synthesis and narrative steps

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::domain::llm::{LlmProvider, LlmRequest};
use crate::domain::DomainError;
use crate::infrastructure::observability::{record_llm_request, LlmRequestMetricParams};

/// The model calls made for one decision, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisStep {
    Status,
    Amount,
    Reason,
    Detail,
    Narrative,
}

impl SynthesisStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Amount => "amount",
            Self::Reason => "reason",
            Self::Detail => "detail",
            Self::Narrative => "narrative",
        }
    }
}

impl fmt::Display for SynthesisStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sends one prompt to the configured model and returns the trimmed reply
#[derive(Debug, Clone)]
pub struct PromptRunner {
    provider: Arc<dyn LlmProvider>,
    model: String,
    temperature: f32,
}

impl PromptRunner {
    pub fn new(provider: Arc<dyn LlmProvider>, model: impl Into<String>, temperature: f32) -> Self {
        Self {
            provider,
            model: model.into(),
            temperature,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Provider errors are returned unchanged; an empty reply is not an error
    pub async fn run(&self, step: SynthesisStep, prompt: String) -> Result<String, DomainError> {
        let request = LlmRequest::builder()
            .user(prompt)
            .temperature(self.temperature)
            .build();

        let start = Instant::now();
        let result = self.provider.chat(&self.model, request).await;
        let duration = start.elapsed();

        let usage = result.as_ref().ok().and_then(|r| r.usage.clone());
        record_llm_request(LlmRequestMetricParams {
            provider: self.provider.provider_name(),
            model: &self.model,
            step: step.as_str(),
            duration,
            success: result.is_ok(),
            input_tokens: usage.as_ref().map(|u| u.prompt_tokens as u64),
            output_tokens: usage.as_ref().map(|u| u.completion_tokens as u64),
        });

        let response = result.inspect_err(|e| {
            warn!(step = %step, error = %e, "Model call failed");
        })?;

        let reply = response.content().trim().to_string();
        debug!(
            step = %step,
            chars = reply.len(),
            duration_ms = duration.as_millis() as u64,
            "Model step completed"
        );

        Ok(reply)
    }
}
