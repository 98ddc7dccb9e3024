//! Policy document types: raw input, text extraction seam and chunks
//!
//! This module provides:
//! - `DocumentInput` carrying the uploaded bytes and what is known about them
//! - `TextExtractor` trait turning bytes into plain text
//! - `Chunk`, `Fingerprint` and the `ChunkingStrategy` trait used to segment text

pub mod chunk;
pub mod extraction;

pub use chunk::{Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy, Fingerprint};
pub use extraction::{DocumentInput, DocumentKind, TextExtractor};

#[cfg(test)]
pub use extraction::MockTextExtractor;
