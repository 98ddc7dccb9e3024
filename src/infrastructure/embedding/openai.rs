//! OpenAI-compatible embedding provider

use async_trait::async_trait;
use serde::Deserialize;

use super::HttpClientTrait;
use crate::domain::embedding::{
    Embedding, EmbeddingInput, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse,
    EmbeddingUsage,
};
use crate::domain::DomainError;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// Provider for `POST /v1/embeddings`
#[derive(Debug)]
pub struct OpenAiEmbeddingProvider<C: HttpClientTrait> {
    client: C,
    auth_header: Option<String>,
    base_url: String,
    model: String,
    dimensions: Option<usize>,
}

impl<C: HttpClientTrait> OpenAiEmbeddingProvider<C> {
    pub fn new(client: C, api_key: Option<String>) -> Self {
        Self::with_base_url(client, api_key, DEFAULT_OPENAI_BASE_URL)
    }

    pub fn with_base_url(
        client: C,
        api_key: Option<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            client,
            auth_header: api_key
                .filter(|key| !key.is_empty())
                .map(|key| format!("Bearer {}", key)),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: DEFAULT_MODEL.to_string(),
            dimensions: None,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Output size sent when a request does not name one
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    fn embeddings_url(&self) -> String {
        format!("{}/v1/embeddings", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![("Content-Type", "application/json")];
        if let Some(auth) = &self.auth_header {
            headers.push(("Authorization", auth.as_str()));
        }
        headers
    }

    fn build_request(&self, request: &EmbeddingRequest) -> serde_json::Value {
        let input = match request.input() {
            EmbeddingInput::Single(s) => serde_json::json!(s),
            EmbeddingInput::Batch(v) => serde_json::json!(v),
        };

        let model = if request.model().is_empty() {
            self.model.as_str()
        } else {
            request.model()
        };

        let mut body = serde_json::json!({
            "model": model,
            "input": input,
        });

        if let Some(dims) = request.dimensions().or(self.dimensions) {
            body["dimensions"] = serde_json::json!(dims);
        }

        body
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<EmbeddingResponse, DomainError> {
        let response: OpenAiEmbeddingResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("openai", format!("Failed to parse embedding response: {}", e))
        })?;

        let embeddings = response
            .data
            .into_iter()
            .map(|d| Embedding::new(d.index, d.embedding))
            .collect();

        let usage = response
            .usage
            .map(|u| EmbeddingUsage::new(u.prompt_tokens, u.total_tokens))
            .unwrap_or_default();

        Ok(EmbeddingResponse::new(response.model, embeddings, usage))
    }
}

#[async_trait]
impl<C: HttpClientTrait> EmbeddingProvider for OpenAiEmbeddingProvider<C> {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let body = self.build_request(&request);
        let response = self
            .client
            .post_json(&self.embeddings_url(), self.headers(), &body)
            .await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }

    fn default_model(&self) -> &str {
        &self.model
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingResponse {
    model: String,
    data: Vec<OpenAiEmbeddingData>,
    usage: Option<OpenAiEmbeddingUsage>,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingData {
    index: usize,
    embedding: Vec<f32>,
}

#[derive(Debug, Deserialize)]
struct OpenAiEmbeddingUsage {
    prompt_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::llm::MockHttpClient;

    const TEST_URL: &str = "https://api.openai.com/v1/embeddings";

    fn create_mock_response(num_embeddings: usize, dimensions: usize) -> serde_json::Value {
        let data: Vec<serde_json::Value> = (0..num_embeddings)
            .map(|i| {
                let embedding: Vec<f32> = (0..dimensions).map(|j| (i + j) as f32 * 0.001).collect();
                serde_json::json!({ "index": i, "embedding": embedding, "object": "embedding" })
            })
            .collect();

        serde_json::json!({
            "model": "text-embedding-3-small",
            "data": data,
            "usage": { "prompt_tokens": 10, "total_tokens": 10 }
        })
    }

    #[tokio::test]
    async fn test_embed_batch() {
        let client = MockHttpClient::new().with_response(TEST_URL, create_mock_response(3, 8));
        let provider = OpenAiEmbeddingProvider::new(client, Some("test-api-key".to_string()));

        let request = EmbeddingRequest::batch(
            "text-embedding-3-small",
            vec!["Section 1".into(), "Section 2".into(), "Section 3".into()],
        );
        let response = provider.embed(request).await.unwrap();

        assert_eq!(response.embeddings().len(), 3);
        assert_eq!(response.usage().prompt_tokens(), 10);
        for (i, emb) in response.embeddings().iter().enumerate() {
            assert_eq!(emb.index(), i);
            assert_eq!(emb.dimensions(), 8);
        }
    }

    #[tokio::test]
    async fn test_request_uses_default_model_and_dimensions() {
        let client = MockHttpClient::new().with_response(TEST_URL, create_mock_response(1, 4));
        let provider = OpenAiEmbeddingProvider::new(client, None).with_model("custom-embed");

        let request = EmbeddingRequest::single("", "Hello").with_dimensions(4);
        provider.embed(request).await.unwrap();

        let (_, body) = provider.client.requests().remove(0);
        assert_eq!(body["model"], "custom-embed");
        assert_eq!(body["dimensions"], 4);
        assert_eq!(body["input"], "Hello");
    }

    #[tokio::test]
    async fn test_configured_dimensions_apply_when_request_has_none() {
        let client = MockHttpClient::new().with_response(TEST_URL, create_mock_response(1, 256));
        let provider = OpenAiEmbeddingProvider::new(client, None).with_dimensions(256);

        provider
            .embed(EmbeddingRequest::single("", "Hello"))
            .await
            .unwrap();

        let (_, body) = provider.client.requests().remove(0);
        assert_eq!(body["dimensions"], 256);
    }

    #[tokio::test]
    async fn test_no_dimensions_field_by_default() {
        let client = MockHttpClient::new().with_response(TEST_URL, create_mock_response(1, 4));
        let provider = OpenAiEmbeddingProvider::new(client, None);

        provider
            .embed(EmbeddingRequest::single("", "Hello"))
            .await
            .unwrap();

        let (_, body) = provider.client.requests().remove(0);
        assert!(body.get("dimensions").is_none());
    }

    #[tokio::test]
    async fn test_embed_error() {
        let client = MockHttpClient::new().with_error(TEST_URL, "Rate limit exceeded");
        let provider = OpenAiEmbeddingProvider::new(client, Some("test-api-key".to_string()));

        let result = provider
            .embed(EmbeddingRequest::single("text-embedding-3-small", "Hello"))
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_missing_usage_is_tolerated() {
        let custom_url = "http://localhost:8080/v1/embeddings";
        let client = MockHttpClient::new().with_response(
            custom_url,
            serde_json::json!({ "model": "local", "data": [{ "index": 0, "embedding": [0.1, 0.2] }] }),
        );
        let provider = OpenAiEmbeddingProvider::with_base_url(client, None, "http://localhost:8080");

        let response = provider
            .embed(EmbeddingRequest::single("local", "Test"))
            .await
            .unwrap();

        assert_eq!(response.usage().total_tokens(), 0);
    }
}
