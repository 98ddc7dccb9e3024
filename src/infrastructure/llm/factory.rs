use std::sync::Arc;
use std::time::Duration;

use super::http_client::HttpClient;
use super::{OllamaProvider, OpenAiProvider};
use crate::config::{LlmConfig, LlmProviderKind};
use crate::domain::{DomainError, LlmProvider};

/// Factory for creating generative model providers
#[derive(Debug)]
pub struct LlmProviderFactory;

impl LlmProviderFactory {
    /// Build the configured provider with its own timeout-bound HTTP client
    pub fn create(config: &LlmConfig) -> Result<Arc<dyn LlmProvider>, DomainError> {
        let http_client = HttpClient::with_timeout(Duration::from_secs(config.timeout_secs))?;

        match config.provider {
            LlmProviderKind::Ollama => {
                let provider = match config.base_url.as_deref() {
                    Some(url) => OllamaProvider::with_base_url(http_client, url),
                    None => OllamaProvider::new(http_client),
                };
                Ok(Arc::new(provider))
            }

            LlmProviderKind::OpenAi => {
                let api_key = config.api_key.clone().filter(|key| !key.is_empty());

                let provider = match config.base_url.as_deref() {
                    Some(url) => OpenAiProvider::with_base_url(http_client, api_key, url),
                    None => {
                        let api_key = api_key.ok_or_else(|| {
                            DomainError::configuration(
                                "llm.api_key is required for the hosted OpenAI API",
                            )
                        })?;
                        OpenAiProvider::new(http_client, Some(api_key))
                    }
                };
                Ok(Arc::new(provider))
            }
        }
    }
}
