//! Policy Advisor
//!
//! Answers natural-language coverage questions about an insurance policy
//! document:
//! - extracts text from an uploaded PDF or plain-text file
//! - segments it and builds a per-request vector index
//! - retrieves passages for several reformulations of the question
//! - derives an Approved / Rejected / Needs Review decision through a
//!   sequence of narrow model prompts and explains it in plain language

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use domain::document::ChunkingConfig;
use domain::retrieval::RetrievalConfig;
use domain::{DomainError, EmbeddingProvider, LlmProvider};
use infrastructure::{
    embedding::EmbeddingProviderFactory,
    index::InMemoryIndexBuilder,
    ingestion::{CompositeExtractor, SlidingWindowChunker},
    llm::LlmProviderFactory,
    services::{PolicyAdvisor, PolicyAdvisorDeps},
};
use tracing::info;

/// Build the providers and the advisor from configuration
pub fn create_app_state(config: &AppConfig) -> Result<AppState, DomainError> {
    let llm = LlmProviderFactory::create(&config.llm)?;
    let embedder = EmbeddingProviderFactory::create(&config.embedding)?;

    info!(
        llm_provider = llm.provider_name(),
        model = %config.llm.model,
        embedding_provider = embedder.provider_name(),
        embedding_model = embedder.default_model(),
        "Providers initialized"
    );

    let advisor = create_policy_advisor(config, Arc::clone(&llm), Arc::clone(&embedder))?;

    Ok(AppState::new(Arc::new(advisor), llm, embedder))
}

/// Wire the pipeline around already constructed providers
pub fn create_policy_advisor(
    config: &AppConfig,
    llm: Arc<dyn LlmProvider>,
    embedder: Arc<dyn EmbeddingProvider>,
) -> Result<PolicyAdvisor, DomainError> {
    let pipeline = &config.pipeline;

    let chunking = ChunkingConfig::new(pipeline.chunk_size, pipeline.chunk_overlap);
    chunking
        .validate()
        .map_err(|e| DomainError::configuration(format!("pipeline: {}", e)))?;

    if pipeline.search_k == 0 || pipeline.per_query_cap == 0 || pipeline.total_cap == 0 {
        return Err(DomainError::configuration(
            "pipeline.search_k, per_query_cap and total_cap must be positive",
        ));
    }
    let retrieval =
        RetrievalConfig::new(pipeline.search_k, pipeline.per_query_cap, pipeline.total_cap);

    let index_builder = InMemoryIndexBuilder::new(embedder)
        .with_similarity_threshold(pipeline.similarity_threshold);

    let advisor = PolicyAdvisor::new(PolicyAdvisorDeps {
        extractor: Arc::new(CompositeExtractor::new()),
        chunker: Arc::new(SlidingWindowChunker::new()),
        index_builder: Arc::new(index_builder),
        llm,
        model: config.llm.model.clone(),
        temperature: config.llm.temperature,
    })
    .with_chunking(chunking)
    .with_retrieval(retrieval);

    Ok(advisor)
}
