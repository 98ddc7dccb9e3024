use async_trait::async_trait;
use std::fmt::Debug;

use super::{LlmRequest, LlmResponse};
use crate::domain::DomainError;

/// Trait for generative model providers (Ollama, OpenAI-compatible, etc.)
#[async_trait]
pub trait LlmProvider: Send + Sync + Debug {
    /// Run a single non-streaming completion
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Check that the backend is reachable
    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(true)
    }
}
