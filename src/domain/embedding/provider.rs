//! Embedding provider trait definition

use async_trait::async_trait;
use std::fmt::Debug;

use super::{EmbeddingRequest, EmbeddingResponse};
use crate::domain::DomainError;

/// Trait for embedding providers (local hashing, Ollama, OpenAI)
#[async_trait]
pub trait EmbeddingProvider: Send + Sync + Debug {
    /// Generate embeddings for the given input
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError>;

    /// Get the provider name
    fn provider_name(&self) -> &'static str;

    /// Model used when the caller does not name one
    fn default_model(&self) -> &str;

    /// Check that the backend is reachable
    async fn health_check(&self) -> Result<bool, DomainError> {
        Ok(true)
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use crate::domain::embedding::{Embedding, EmbeddingUsage};

    /// Mock provider producing byte-sum vectors, or a configured error
    #[derive(Debug)]
    pub struct MockEmbeddingProvider {
        name: &'static str,
        dimensions: usize,
        error: Option<String>,
    }

    impl MockEmbeddingProvider {
        pub fn new(name: &'static str, dimensions: usize) -> Self {
            Self {
                name,
                dimensions,
                error: None,
            }
        }

        pub fn with_error(mut self, error: impl Into<String>) -> Self {
            self.error = Some(error.into());
            self
        }
    }

    #[async_trait]
    impl EmbeddingProvider for MockEmbeddingProvider {
        async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
            if let Some(ref error) = self.error {
                return Err(DomainError::provider(self.name, error));
            }

            let embeddings: Vec<Embedding> = request
                .inputs()
                .iter()
                .enumerate()
                .map(|(idx, text)| {
                    let hash = text.bytes().fold(0u64, |acc, b| acc.wrapping_add(b as u64));
                    let vector: Vec<f32> = (0..self.dimensions)
                        .map(|i| ((hash.wrapping_add(i as u64) % 1000) as f32 / 1000.0) - 0.5)
                        .collect();

                    Embedding::new(idx, vector)
                })
                .collect();

            Ok(EmbeddingResponse::new(
                request.model().to_string(),
                embeddings,
                EmbeddingUsage::default(),
            ))
        }

        fn provider_name(&self) -> &'static str {
            self.name
        }

        fn default_model(&self) -> &str {
            "mock-embedding"
        }

        async fn health_check(&self) -> Result<bool, DomainError> {
            match &self.error {
                Some(error) => Err(DomainError::provider(self.name, error)),
                None => Ok(true),
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[tokio::test]
        async fn test_mock_provider_batch_input() {
            let provider = MockEmbeddingProvider::new("test", 16);
            let request = EmbeddingRequest::batch("mock", vec!["a".into(), "b".into()]);

            let response = provider.embed(request).await.unwrap();

            assert_eq!(response.embeddings().len(), 2);
            assert_eq!(response.embeddings()[1].dimensions(), 16);
        }

        #[tokio::test]
        async fn test_mock_provider_error() {
            let provider = MockEmbeddingProvider::new("test", 16).with_error("API error");
            let result = provider.embed(EmbeddingRequest::single("mock", "x")).await;

            assert!(result.is_err());
        }
    }
}
