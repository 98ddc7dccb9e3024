use serde::{Deserialize, Serialize};

use super::ScoredChunk;

const CONTEXT_SEPARATOR: &str = "\n\n";

/// Limits applied while merging retrieval passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Chunks requested from the index per search term
    pub search_k: usize,
    /// Chunks kept from each pass before deduplication
    pub per_query_cap: usize,
    /// Maximum unique chunks across all passes
    pub total_cap: usize,
}

impl RetrievalConfig {
    pub fn new(search_k: usize, per_query_cap: usize, total_cap: usize) -> Self {
        Self {
            search_k,
            per_query_cap,
            total_cap,
        }
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            search_k: 6,
            per_query_cap: 3,
            total_cap: 5,
        }
    }
}

/// Unique chunks in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RetrievedContext {
    chunks: Vec<ScoredChunk>,
}

impl RetrievedContext {
    pub fn new(chunks: Vec<ScoredChunk>) -> Self {
        Self { chunks }
    }

    pub fn chunks(&self) -> &[ScoredChunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunk texts separated by blank lines, in retrieval order
    pub fn joined_text(&self) -> String {
        self.chunks
            .iter()
            .map(|scored| scored.chunk.content())
            .collect::<Vec<_>>()
            .join(CONTEXT_SEPARATOR)
    }
}
