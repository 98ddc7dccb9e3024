//! Ollama embedding provider

use async_trait::async_trait;
use serde::Deserialize;

use super::HttpClientTrait;
use crate::domain::embedding::{
    Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage,
};
use crate::domain::DomainError;
use crate::infrastructure::llm::DEFAULT_OLLAMA_BASE_URL;

const DEFAULT_MODEL: &str = "all-minilm";

/// Provider for `POST /api/embeddings`, which takes one prompt per call
#[derive(Debug)]
pub struct OllamaEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
    model: String,
}

impl<C: HttpClientTrait> OllamaEmbeddingProvider<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_OLLAMA_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    fn embeddings_url(&self) -> String {
        format!("{}/api/embeddings", self.base_url)
    }

    async fn embed_one(&self, model: &str, text: &str) -> Result<Vec<f32>, DomainError> {
        let body = serde_json::json!({ "model": model, "prompt": text });
        let json = self
            .client
            .post_json(
                &self.embeddings_url(),
                vec![("Content-Type", "application/json")],
                &body,
            )
            .await?;

        let response: OllamaEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("ollama", format!("Failed to parse embedding response: {}", e))
        })?;

        if response.embedding.is_empty() {
            return Err(DomainError::provider("ollama", "Empty embedding returned"));
        }

        Ok(response.embedding)
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OllamaEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let model = if request.model().is_empty() {
            self.model.clone()
        } else {
            request.model().to_string()
        };

        let mut embeddings = Vec::new();
        for (index, text) in request.inputs().into_iter().enumerate() {
            let vector = self.embed_one(&model, text).await?;
            embeddings.push(Embedding::new(index, vector));
        }

        Ok(EmbeddingResponse::new(model, embeddings, EmbeddingUsage::default()))
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }

    fn default_model(&self) -> &str {
        &self.model
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        let json = self
            .client
            .get_json(&format!("{}/api/tags", self.base_url), vec![])
            .await?;
        Ok(json.get("models").is_some())
    }
}

#[derive(Debug, Deserialize)]
struct OllamaEmbeddingResponse {
    #[serde(default)]
    embedding: Vec<f32>,
}
