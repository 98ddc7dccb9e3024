use std::sync::Arc;
use std::time::Duration;

use super::{HashingEmbeddingProvider, OllamaEmbeddingProvider, OpenAiEmbeddingProvider};
use crate::config::{EmbeddingConfig, EmbeddingProviderKind};
use crate::domain::{DomainError, EmbeddingProvider};
use crate::infrastructure::llm::HttpClient;

/// Vector size of the hashing embedder when `embedding.dimensions` is unset
pub const DEFAULT_HASHING_DIMENSIONS: usize = 384;

/// Factory for creating embedding providers
#[derive(Debug)]
pub struct EmbeddingProviderFactory;

impl EmbeddingProviderFactory {
    pub fn create(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>, DomainError> {
        match config.provider {
            EmbeddingProviderKind::Hashing => {
                let dimensions = config.dimensions.unwrap_or(DEFAULT_HASHING_DIMENSIONS);
                Ok(Arc::new(HashingEmbeddingProvider::new(dimensions)?))
            }

            EmbeddingProviderKind::Ollama => {
                let client = Self::http_client(config)?;
                let mut provider = match config.base_url.as_deref() {
                    Some(url) => OllamaEmbeddingProvider::with_base_url(client, url),
                    None => OllamaEmbeddingProvider::new(client),
                };
                if let Some(model) = &config.model {
                    provider = provider.with_model(model);
                }
                Ok(Arc::new(provider))
            }

            EmbeddingProviderKind::OpenAi => {
                let client = Self::http_client(config)?;
                let api_key = config.api_key.clone().filter(|key| !key.is_empty());

                let mut provider = match config.base_url.as_deref() {
                    Some(url) => OpenAiEmbeddingProvider::with_base_url(client, api_key, url),
                    None => {
                        let api_key = api_key.ok_or_else(|| {
                            DomainError::configuration(
                                "embedding.api_key is required for the hosted OpenAI API",
                            )
                        })?;
                        OpenAiEmbeddingProvider::new(client, Some(api_key))
                    }
                };
                if let Some(model) = &config.model {
                    provider = provider.with_model(model);
                }
                if let Some(dimensions) = config.dimensions {
                    provider = provider.with_dimensions(dimensions);
                }
                Ok(Arc::new(provider))
            }
        }
    }

    fn http_client(config: &EmbeddingConfig) -> Result<HttpClient, DomainError> {
        HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))
    }
}
