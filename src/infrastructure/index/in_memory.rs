//! Brute-force cosine index held in memory for one request

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::domain::document::Chunk;
use crate::domain::embedding::{cosine_similarity, EmbeddingProvider, EmbeddingRequest};
use crate::domain::retrieval::{IndexBuilder, ScoredChunk, VectorIndex};
use crate::domain::DomainError;

/// Chunks with their embeddings, searched by cosine similarity
#[derive(Debug)]
pub struct InMemoryVectorIndex {
    embedder: Arc<dyn EmbeddingProvider>,
    entries: Vec<(Chunk, Vec<f32>)>,
    similarity_threshold: Option<f32>,
}

impl InMemoryVectorIndex {
    async fn embed_query(&self, query: &str) -> Result<Vec<f32>, DomainError> {
        let request = EmbeddingRequest::single(self.embedder.default_model(), query);
        self.embedder
            .embed(request)
            .await?
            .into_vectors()
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::index("Embedding provider returned no query vector"))
    }
}

#[async_trait]
impl VectorIndex for InMemoryVectorIndex {
    async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>, DomainError> {
        if self.entries.is_empty() || k == 0 {
            return Ok(Vec::new());
        }

        let query_vector = self.embed_query(query).await?;

        let mut scored: Vec<ScoredChunk> = self
            .entries
            .iter()
            .map(|(chunk, vector)| {
                ScoredChunk::new(chunk.clone(), cosine_similarity(&query_vector, vector))
            })
            .filter(|hit| {
                self.similarity_threshold
                    .is_none_or(|threshold| hit.score >= threshold)
            })
            .collect();

        // Stable: equal scores stay in document order
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        scored.truncate(k);

        Ok(scored)
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Embeds every chunk in one batch and returns an [`InMemoryVectorIndex`]
#[derive(Debug, Clone)]
pub struct InMemoryIndexBuilder {
    embedder: Arc<dyn EmbeddingProvider>,
    similarity_threshold: Option<f32>,
}

impl InMemoryIndexBuilder {
    pub fn new(embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            embedder,
            similarity_threshold: None,
        }
    }

    pub fn with_similarity_threshold(mut self, threshold: Option<f32>) -> Self {
        self.similarity_threshold = threshold;
        self
    }
}

#[async_trait]
impl IndexBuilder for InMemoryIndexBuilder {
    async fn build(&self, chunks: Vec<Chunk>) -> Result<Box<dyn VectorIndex>, DomainError> {
        let entries = if chunks.is_empty() {
            Vec::new()
        } else {
            let texts = chunks.iter().map(|c| c.content().to_string()).collect();
            let request = EmbeddingRequest::batch(self.embedder.default_model(), texts);
            let vectors = self.embedder.embed(request).await?.into_vectors();

            if vectors.len() != chunks.len() {
                return Err(DomainError::index(format!(
                    "Expected {} chunk embeddings, got {}",
                    chunks.len(),
                    vectors.len()
                )));
            }

            chunks.into_iter().zip(vectors).collect()
        };

        debug!(
            chunks = entries.len(),
            provider = self.embedder.provider_name(),
            "In-memory index built"
        );

        Ok(Box::new(InMemoryVectorIndex {
            embedder: Arc::clone(&self.embedder),
            entries,
            similarity_threshold: self.similarity_threshold,
        }))
    }

    fn name(&self) -> &'static str {
        "in_memory"
    }
}
