//! Domain layer - Core business logic and entities

pub mod analysis;
pub mod decision;
pub mod document;
pub mod embedding;
pub mod error;
pub mod llm;
pub mod query;
pub mod retrieval;

pub use analysis::ContextAnalysis;
pub use decision::{DecisionRecord, DecisionStatus, FinalResponse};
pub use document::{
    Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy, DocumentInput, DocumentKind,
    Fingerprint, TextExtractor,
};
pub use embedding::{EmbeddingProvider, EmbeddingRequest, EmbeddingResponse};
pub use error::DomainError;
pub use llm::{FinishReason, LlmProvider, LlmRequest, LlmResponse, Message, MessageRole, Usage};
pub use query::StructuredQuery;
pub use retrieval::{IndexBuilder, RetrievalConfig, RetrievedContext, ScoredChunk, VectorIndex};
