//! Application state for shared services

use std::fmt;
use std::sync::Arc;

use crate::domain::document::DocumentInput;
use crate::domain::embedding::EmbeddingProvider;
use crate::domain::llm::LlmProvider;
use crate::domain::{DomainError, FinalResponse};
use crate::infrastructure::services::PolicyAdvisor;

/// Application state containing shared services using dynamic dispatch
#[derive(Clone)]
pub struct AppState {
    pub advisor: Arc<dyn PolicyAdvisorTrait>,
    pub llm_provider: Arc<dyn LlmProvider>,
    pub embedding_provider: Arc<dyn EmbeddingProvider>,
}

impl AppState {
    pub fn new(
        advisor: Arc<dyn PolicyAdvisorTrait>,
        llm_provider: Arc<dyn LlmProvider>,
        embedding_provider: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            advisor,
            llm_provider,
            embedding_provider,
        }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("llm_provider", &self.llm_provider.provider_name())
            .field("embedding_provider", &self.embedding_provider.provider_name())
            .finish_non_exhaustive()
    }
}

/// Trait for the question answering pipeline
#[async_trait::async_trait]
pub trait PolicyAdvisorTrait: Send + Sync {
    async fn process_document_and_query(
        &self,
        document: &DocumentInput,
        query: &str,
    ) -> Result<FinalResponse, DomainError>;
}

#[async_trait::async_trait]
impl PolicyAdvisorTrait for PolicyAdvisor {
    async fn process_document_and_query(
        &self,
        document: &DocumentInput,
        query: &str,
    ) -> Result<FinalResponse, DomainError> {
        PolicyAdvisor::process_document_and_query(self, document, query).await
    }
}
