use std::collections::HashSet;

use tracing::debug;

use super::{RetrievalConfig, RetrievedContext, VectorIndex};
use crate::domain::error::DomainError;

/// Merge one retrieval pass per search term into a bounded, deduplicated
/// context.
///
/// Terms are searched in order. Each pass keeps at most `per_query_cap` hits,
/// a chunk whose fingerprint was already seen is dropped, and no further
/// terms are searched once `total_cap` unique chunks are held.
pub async fn retrieve(
    index: &dyn VectorIndex,
    queries: &[String],
    config: &RetrievalConfig,
) -> Result<RetrievedContext, DomainError> {
    let mut seen = HashSet::new();
    let mut collected = Vec::with_capacity(config.total_cap);

    for query in queries {
        if collected.len() >= config.total_cap {
            break;
        }

        let hits = index.search(query, config.search_k).await?;
        let before = collected.len();

        for hit in hits.into_iter().take(config.per_query_cap) {
            if collected.len() >= config.total_cap {
                break;
            }
            if seen.insert(hit.chunk.fingerprint()) {
                collected.push(hit);
            }
        }

        debug!(
            query = %query,
            added = collected.len() - before,
            total = collected.len(),
            "Retrieval pass complete"
        );
    }

    Ok(RetrievedContext::new(collected))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::document::{Chunk, ChunkMetadata};
    use crate::domain::retrieval::MockVectorIndex;

    fn chunk(text: &str, index: usize) -> Chunk {
        Chunk::new(text, ChunkMetadata::new(index, index * 10, index * 10 + text.len()))
    }

    fn terms(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn contents(context: &RetrievedContext) -> Vec<String> {
        context
            .chunks()
            .iter()
            .map(|c| c.chunk.content().to_string())
            .collect()
    }

    #[tokio::test]
    async fn test_duplicate_kept_once_at_first_rank() {
        let index = MockVectorIndex::new()
            .with_hits("q1", vec![chunk("alpha", 0), chunk("shared", 1)])
            .with_hits("q2", vec![chunk("shared", 1), chunk("beta", 2)]);

        let context = retrieve(&index, &terms(&["q1", "q2"]), &RetrievalConfig::default())
            .await
            .unwrap();

        assert_eq!(contents(&context), vec!["alpha", "shared", "beta"]);
    }

    #[tokio::test]
    async fn test_per_query_cap_applies_before_dedup() {
        let index = MockVectorIndex::new().with_hits(
            "q1",
            vec![chunk("a", 0), chunk("b", 1), chunk("c", 2), chunk("d", 3)],
        );

        let context = retrieve(&index, &terms(&["q1"]), &RetrievalConfig::new(6, 3, 5))
            .await
            .unwrap();

        assert_eq!(contents(&context), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_total_cap_is_never_exceeded() {
        let mut index = MockVectorIndex::new();
        let mut queries = Vec::new();
        for q in 0..4 {
            let chunks = (0..3).map(|i| chunk(&format!("q{}-{}", q, i), q * 3 + i)).collect();
            index = index.with_hits(format!("q{}", q), chunks);
            queries.push(format!("q{}", q));
        }

        let context = retrieve(&index, &queries, &RetrievalConfig::default())
            .await
            .unwrap();

        assert_eq!(context.len(), 5);
        assert_eq!(contents(&context)[..3], ["q0-0", "q0-1", "q0-2"]);
    }

    #[tokio::test]
    async fn test_later_terms_skipped_once_full() {
        let index = MockVectorIndex::new()
            .with_hits("q1", vec![chunk("a", 0), chunk("b", 1)])
            .with_hits("q2", vec![chunk("c", 2)]);

        let context = retrieve(&index, &terms(&["q1", "q2", "q3"]), &RetrievalConfig::new(6, 3, 2))
            .await
            .unwrap();

        assert_eq!(context.len(), 2);
        assert_eq!(index.searches(), vec!["q1"]);
    }

    #[tokio::test]
    async fn test_whitespace_variants_are_duplicates() {
        let index = MockVectorIndex::new()
            .with_hits("q1", vec![chunk("Section 4\nExclusions", 0)])
            .with_hits("q2", vec![chunk("Section 4 Exclusions", 5)]);

        let context = retrieve(&index, &terms(&["q1", "q2"]), &RetrievalConfig::default())
            .await
            .unwrap();

        assert_eq!(context.len(), 1);
        assert_eq!(context.chunks()[0].chunk.index(), 0);
    }

    #[tokio::test]
    async fn test_no_matches_is_empty_context() {
        let index = MockVectorIndex::new();

        let context = retrieve(&index, &terms(&["a", "b"]), &RetrievalConfig::default())
            .await
            .unwrap();

        assert!(context.is_empty());
        assert_eq!(index.searches(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_index_error_propagates() {
        let index = MockVectorIndex::new().with_error("embedding backend down");

        let result = retrieve(&index, &terms(&["a"]), &RetrievalConfig::default()).await;

        assert!(matches!(result, Err(DomainError::Index(_))));
    }
}
