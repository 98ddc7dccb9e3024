//! Embedding provider implementations

mod factory;
mod hashing;
mod ollama;
mod openai;

pub use factory::EmbeddingProviderFactory;
pub use hashing::HashingEmbeddingProvider;
pub use ollama::OllamaEmbeddingProvider;
pub use openai::OpenAiEmbeddingProvider;

// Re-export HTTP client for use by embedding providers
pub use super::llm::{HttpClient, HttpClientTrait};
