//! Policy advisor service - the end-to-end question answering pipeline

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, instrument, warn};

use crate::domain::analysis::ContextAnalysis;
use crate::domain::decision::FinalResponse;
use crate::domain::document::{ChunkingConfig, ChunkingStrategy, DocumentInput, TextExtractor};
use crate::domain::llm::LlmProvider;
use crate::domain::query::{reformulate, StructuredQuery};
use crate::domain::retrieval::{retrieve, IndexBuilder, RetrievalConfig};
use crate::domain::DomainError;
use crate::infrastructure::decision::{DecisionSynthesizer, PromptRunner, ResponseAssembler};
use crate::infrastructure::observability::record_policy_decision;

/// Collaborators the advisor is built from
pub struct PolicyAdvisorDeps {
    pub extractor: Arc<dyn TextExtractor>,
    pub chunker: Arc<dyn ChunkingStrategy>,
    pub index_builder: Arc<dyn IndexBuilder>,
    pub llm: Arc<dyn LlmProvider>,
    pub model: String,
    pub temperature: f32,
}

/// Answers a coverage question against one uploaded policy document.
///
/// Every request builds its own index; the advisor holds no per-request
/// state and can be shared across tasks.
pub struct PolicyAdvisor {
    extractor: Arc<dyn TextExtractor>,
    chunker: Arc<dyn ChunkingStrategy>,
    index_builder: Arc<dyn IndexBuilder>,
    synthesizer: DecisionSynthesizer,
    assembler: ResponseAssembler,
    chunking: ChunkingConfig,
    retrieval: RetrievalConfig,
}

impl PolicyAdvisor {
    pub fn new(deps: PolicyAdvisorDeps) -> Self {
        let runner = PromptRunner::new(deps.llm, deps.model, deps.temperature);

        Self {
            extractor: deps.extractor,
            chunker: deps.chunker,
            index_builder: deps.index_builder,
            synthesizer: DecisionSynthesizer::new(runner.clone()),
            assembler: ResponseAssembler::new(runner),
            chunking: ChunkingConfig::default(),
            retrieval: RetrievalConfig::default(),
        }
    }

    pub fn with_chunking(mut self, chunking: ChunkingConfig) -> Self {
        self.chunking = chunking;
        self
    }

    pub fn with_retrieval(mut self, retrieval: RetrievalConfig) -> Self {
        self.retrieval = retrieval;
        self
    }

    /// Run the whole pipeline for one document and question.
    ///
    /// Unreadable documents and questions the document says nothing about
    /// come back as ordinary responses. Errors are reserved for a blank
    /// query and for model, embedding or index failures.
    #[instrument(skip_all, fields(document_bytes = document.bytes().len()))]
    pub async fn process_document_and_query(
        &self,
        document: &DocumentInput,
        query: &str,
    ) -> Result<FinalResponse, DomainError> {
        let raw_query = query;
        let query = query.trim();
        if query.is_empty() {
            return Err(DomainError::validation("Query must not be empty"));
        }

        let started = Instant::now();

        let text = match self.extractor.extract(document).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                warn!("Document contained no extractable text");
                return Ok(finish(FinalResponse::extraction_failed(), started, 0));
            }
            Err(e) => {
                warn!(error = %e, "Document extraction failed");
                return Ok(finish(FinalResponse::extraction_failed(), started, 0));
            }
        };

        let chunks = self.chunker.chunk(&text, &self.chunking)?;
        debug!(
            chars = text.len(),
            chunks = chunks.len(),
            chunker = self.chunker.name(),
            "Document segmented"
        );

        let index = self.index_builder.build(chunks).await?;

        let structured = StructuredQuery::from_query(query);
        let queries = reformulate(query, &structured);
        debug!(
            subject = %structured.subject,
            age = ?structured.age,
            policy_duration_months = ?structured.policy_duration_months,
            "Query structured"
        );

        let context = retrieve(index.as_ref(), &queries, &self.retrieval).await?;
        if context.is_empty() {
            info!("No relevant policy text retrieved");
            return Ok(finish(FinalResponse::no_relevant_context(raw_query), started, 0));
        }

        let context_text = context.joined_text();
        let analysis = ContextAnalysis::analyze(&context_text);
        debug!(
            coverage_found = analysis.coverage_found,
            exclusion_found = analysis.exclusion_found,
            amounts = analysis.amounts.len(),
            "Context analyzed"
        );

        let record = self.synthesizer.synthesize(&context_text, query).await?;
        let response = self
            .assembler
            .assemble(&record, &analysis, &structured, query)
            .await?;

        Ok(finish(response, started, context.len()))
    }
}

impl fmt::Debug for PolicyAdvisor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyAdvisor")
            .field("chunker", &self.chunker)
            .field("index_builder", &self.index_builder)
            .field("synthesizer", &self.synthesizer)
            .field("chunking", &self.chunking)
            .field("retrieval", &self.retrieval)
            .finish_non_exhaustive()
    }
}

fn finish(response: FinalResponse, started: Instant, retrieved_chunks: usize) -> FinalResponse {
    let elapsed = started.elapsed();
    record_policy_decision(response.decision.as_str(), elapsed, retrieved_chunks);

    info!(
        decision = %response.decision,
        retrieved_chunks,
        duration_ms = elapsed.as_millis() as u64,
        "Policy question answered"
    );

    response
}
