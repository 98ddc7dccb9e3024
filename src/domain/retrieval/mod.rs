//! Retrieval - the per-request vector index seam and multi-pass retrieval

pub mod context;
pub mod index;
pub mod retriever;

pub use context::{RetrievalConfig, RetrievedContext};
pub use index::{IndexBuilder, ScoredChunk, VectorIndex};
pub use retriever::retrieve;

#[cfg(test)]
pub use index::mock::{MockIndexBuilder, MockVectorIndex};
