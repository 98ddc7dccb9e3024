//! Local token-hashing embedder
//!
//! Lower-cased tokens are hashed into a fixed number of signed buckets and
//! the vector is L2 normalized. Lexical overlap drives similarity, which is
//! enough to rank policy passages without a model server.

use async_trait::async_trait;
use sha2::{Digest, Sha256};

use crate::domain::embedding::{
    Embedding, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse, EmbeddingUsage,
};
use crate::domain::DomainError;

const MODEL_NAME: &str = "hashing-bow";
const MIN_DIMENSIONS: usize = 8;
const MAX_DIMENSIONS: usize = 4096;

#[derive(Debug, Clone)]
pub struct HashingEmbeddingProvider {
    dimensions: usize,
}

impl HashingEmbeddingProvider {
    pub fn new(dimensions: usize) -> Result<Self, DomainError> {
        if dimensions == 0 {
            return Err(DomainError::configuration(
                "embedding dimensions must be greater than zero",
            ));
        }

        Ok(Self {
            dimensions: dimensions.clamp(MIN_DIMENSIONS, MAX_DIMENSIONS),
        })
    }

    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
            .map(str::to_lowercase)
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimensions];

        for token in Self::tokenize(text) {
            let digest = Sha256::digest(token.as_bytes());
            let mut head = [0u8; 8];
            head.copy_from_slice(&digest[..8]);
            let hash = u64::from_le_bytes(head);

            let bucket = (hash % self.dimensions as u64) as usize;
            let sign = if digest[8] & 1 == 0 { 1.0 } else { -1.0 };
            vector[bucket] += sign;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for value in &mut vector {
                *value /= norm;
            }
        }

        vector
    }
}

#[async_trait]
impl EmbeddingProvider for HashingEmbeddingProvider {
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse, DomainError> {
        let inputs = request.inputs();
        let token_count: usize = inputs.iter().map(|text| Self::tokenize(text).count()).sum();

        let embeddings = inputs
            .iter()
            .enumerate()
            .map(|(index, text)| Embedding::new(index, self.embed_text(text)))
            .collect();

        let tokens = u32::try_from(token_count).unwrap_or(u32::MAX);
        Ok(EmbeddingResponse::new(
            MODEL_NAME.to_string(),
            embeddings,
            EmbeddingUsage::new(tokens, tokens),
        ))
    }

    fn provider_name(&self) -> &'static str {
        "hashing"
    }

    fn default_model(&self) -> &str {
        MODEL_NAME
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::embedding::cosine_similarity;

    async fn embed_one(provider: &HashingEmbeddingProvider, text: &str) -> Vec<f32> {
        provider
            .embed(EmbeddingRequest::single(MODEL_NAME, text))
            .await
            .unwrap()
            .into_vectors()
            .remove(0)
    }

    #[test]
    fn test_zero_dimensions_rejected() {
        assert!(HashingEmbeddingProvider::new(0).is_err());
        assert_eq!(HashingEmbeddingProvider::new(2).unwrap().dimensions(), MIN_DIMENSIONS);
    }

    #[tokio::test]
    async fn test_deterministic_and_normalized() {
        let provider = HashingEmbeddingProvider::new(64).unwrap();

        let a = embed_one(&provider, "Dental implants are excluded").await;
        let b = embed_one(&provider, "Dental implants are excluded").await;

        assert_eq!(a, b);
        let norm: f32 = a.iter().map(|v| v * v).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_case_and_punctuation_insensitive() {
        let provider = HashingEmbeddingProvider::new(128).unwrap();

        let a = embed_one(&provider, "Physiotherapy, COVERED!").await;
        let b = embed_one(&provider, "physiotherapy covered").await;

        assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_overlap_ranks_higher() {
        let provider = HashingEmbeddingProvider::new(384).unwrap();

        let query = embed_one(&provider, "physiotherapy coverage").await;
        let related = embed_one(&provider, "Physiotherapy coverage is limited to 10 sessions").await;
        let unrelated = embed_one(&provider, "Premiums are due on the first of the month").await;

        assert!(cosine_similarity(&query, &related) > cosine_similarity(&query, &unrelated));
    }

    #[tokio::test]
    async fn test_empty_text_is_zero_vector() {
        let provider = HashingEmbeddingProvider::new(16).unwrap();
        let vector = embed_one(&provider, "  ").await;

        assert!(vector.iter().all(|v| *v == 0.0));
    }
}
