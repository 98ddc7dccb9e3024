//! Document ingestion infrastructure
//!
//! Text extraction from uploaded bytes and chunking of the extracted text.

pub mod chunkers;
pub mod extractors;

pub use chunkers::SlidingWindowChunker;
pub use extractors::{CompositeExtractor, PdfTextExtractor, PlainTextExtractor};
