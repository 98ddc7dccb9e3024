//! Vector index traits

use std::fmt::Debug;

use async_trait::async_trait;

use crate::domain::document::Chunk;
use crate::domain::error::DomainError;

/// A chunk paired with its similarity to a query
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredChunk {
    pub chunk: Chunk,
    /// Backend-specific score, higher is more similar
    pub score: f32,
}

impl ScoredChunk {
    pub fn new(chunk: Chunk, score: f32) -> Self {
        Self { chunk, score }
    }
}

/// A searchable index over one document's chunks
#[async_trait]
pub trait VectorIndex: Send + Sync + Debug {
    /// Top `k` chunks for the query, best first
    async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>, DomainError>;

    /// Number of indexed chunks
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Builds a fresh index for each request
#[async_trait]
pub trait IndexBuilder: Send + Sync + Debug {
    async fn build(&self, chunks: Vec<Chunk>) -> Result<Box<dyn VectorIndex>, DomainError>;

    /// Get the builder name
    fn name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    /// Index returning scripted hits per query and recording each search
    #[derive(Debug, Clone, Default)]
    pub struct MockVectorIndex {
        hits: HashMap<String, Vec<ScoredChunk>>,
        searches: Arc<Mutex<Vec<String>>>,
        error: Option<String>,
    }

    impl MockVectorIndex {
        pub fn new() -> Self {
            Self::default()
        }

        /// Hits for a query; scores descend in the given order
        pub fn with_hits(mut self, query: impl Into<String>, chunks: Vec<Chunk>) -> Self {
            let count = chunks.len() as f32;
            let scored = chunks
                .into_iter()
                .enumerate()
                .map(|(i, chunk)| ScoredChunk::new(chunk, 1.0 - i as f32 / (count + 1.0)))
                .collect();
            self.hits.insert(query.into(), scored);
            self
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }

        pub fn searches(&self) -> Vec<String> {
            self.searches.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VectorIndex for MockVectorIndex {
        async fn search(&self, query: &str, k: usize) -> Result<Vec<ScoredChunk>, DomainError> {
            self.searches.lock().unwrap().push(query.to_string());

            if let Some(error) = &self.error {
                return Err(DomainError::index(error.clone()));
            }

            Ok(self
                .hits
                .get(query)
                .map(|hits| hits.iter().take(k).cloned().collect())
                .unwrap_or_default())
        }

        fn len(&self) -> usize {
            self.hits.values().map(Vec::len).sum()
        }
    }

    /// Builder handing out clones of a prepared index
    #[derive(Debug, Clone, Default)]
    pub struct MockIndexBuilder {
        index: MockVectorIndex,
        built_with: Arc<Mutex<Vec<usize>>>,
    }

    impl MockIndexBuilder {
        pub fn new(index: MockVectorIndex) -> Self {
            Self {
                index,
                built_with: Arc::new(Mutex::new(Vec::new())),
            }
        }

        /// Chunk counts of every build call
        pub fn builds(&self) -> Vec<usize> {
            self.built_with.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl IndexBuilder for MockIndexBuilder {
        async fn build(&self, chunks: Vec<Chunk>) -> Result<Box<dyn VectorIndex>, DomainError> {
            self.built_with.lock().unwrap().push(chunks.len());
            Ok(Box::new(self.index.clone()))
        }

        fn name(&self) -> &'static str {
            "mock"
        }
    }
}
