//! Ollama generate-endpoint provider

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::http_client::HttpClientTrait;
use crate::domain::{DomainError, FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, Usage};

pub const DEFAULT_OLLAMA_BASE_URL: &str = "http://localhost:11434";

/// Ollama provider using non-streaming `/api/generate`
#[derive(Debug)]
pub struct OllamaProvider<C: HttpClientTrait> {
    client: C,
    base_url: String,
}

impl<C: HttpClientTrait> OllamaProvider<C> {
    pub fn new(client: C) -> Self {
        Self::with_base_url(client, DEFAULT_OLLAMA_BASE_URL)
    }

    pub fn with_base_url(client: C, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }

    fn headers(&self) -> Vec<(&str, &str)> {
        vec![("Content-Type", "application/json")]
    }

    fn build_request(&self, model: &str, request: &LlmRequest) -> Result<serde_json::Value, DomainError> {
        let options = GenerateOptions {
            temperature: request.temperature,
        };

        let body = GenerateRequest {
            model: model.to_string(),
            prompt: request.prompt_text(),
            system: request.system_text(),
            stream: false,
            options: (!options.is_empty()).then_some(options),
        };

        serde_json::to_value(body).map_err(|e| {
            DomainError::internal(format!("Failed to serialize Ollama request: {}", e))
        })
    }

    fn parse_response(&self, json: serde_json::Value) -> Result<LlmResponse, DomainError> {
        let response: GenerateResponse = serde_json::from_value(json).map_err(|e| {
            DomainError::provider("ollama", format!("Failed to parse response: {}", e))
        })?;

        let id = format!("ollama-{}", uuid::Uuid::new_v4());
        let mut llm_response =
            LlmResponse::new(id, response.model, Message::assistant(response.response));

        if response.done {
            let reason = match response.done_reason.as_deref() {
                Some("length") => FinishReason::Length,
                _ => FinishReason::Stop,
            };
            llm_response = llm_response.with_finish_reason(reason);
        }

        if let (Some(prompt), Some(completion)) = (response.prompt_eval_count, response.eval_count) {
            llm_response = llm_response.with_usage(Usage::new(prompt, completion));
        }

        Ok(llm_response)
    }
}

#[async_trait]
impl<C: HttpClientTrait> LlmProvider for OllamaProvider<C> {
    async fn chat(&self, model: &str, request: LlmRequest) -> Result<LlmResponse, DomainError> {
        let url = self.generate_url();
        let body = self.build_request(model, &request)?;
        let response = self.client.post_json(&url, self.headers(), &body).await?;

        self.parse_response(response)
    }

    fn provider_name(&self) -> &'static str {
        "ollama"
    }

    async fn health_check(&self) -> Result<bool, DomainError> {
        let json = self.client.get_json(&self.tags_url(), vec![]).await?;
        Ok(json.get("models").is_some())
    }
}

// Ollama API types

#[derive(Debug, Serialize)]
struct GenerateRequest {
    model: String,
    prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerateOptions>,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

impl GenerateOptions {
    fn is_empty(&self) -> bool {
        self.temperature.is_none()
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    model: String,
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
    done_reason: Option<String>,
    prompt_eval_count: Option<u32>,
    eval_count: Option<u32>,
}
