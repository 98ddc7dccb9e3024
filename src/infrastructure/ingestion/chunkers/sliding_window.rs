//! Sliding-window chunking over grapheme clusters

use unicode_segmentation::UnicodeSegmentation;

use crate::domain::document::{Chunk, ChunkMetadata, ChunkingConfig, ChunkingStrategy};
use crate::domain::DomainError;

/// Fixed windows of `chunk_size` graphemes, each sharing `chunk_overlap`
/// graphemes with the previous one.
///
/// Text is kept verbatim (no trimming), so dropping the leading overlap of
/// every chunk after the first and concatenating yields the input.
#[derive(Debug, Clone, Default)]
pub struct SlidingWindowChunker;

impl SlidingWindowChunker {
    pub fn new() -> Self {
        Self
    }
}

impl ChunkingStrategy for SlidingWindowChunker {
    fn chunk(&self, text: &str, config: &ChunkingConfig) -> Result<Vec<Chunk>, DomainError> {
        config.validate()?;

        // Byte offset of every grapheme start, plus the end of the text
        let mut offsets: Vec<usize> = text.grapheme_indices(true).map(|(i, _)| i).collect();
        let total = offsets.len();
        if total == 0 {
            return Ok(Vec::new());
        }
        offsets.push(text.len());

        let step = config.step();
        let mut chunks = Vec::with_capacity(total.div_ceil(step));
        let mut start = 0;

        loop {
            let end = (start + config.chunk_size).min(total);
            chunks.push(Chunk::new(
                &text[offsets[start]..offsets[end]],
                ChunkMetadata::new(chunks.len(), start, end),
            ));

            if end == total {
                break;
            }
            start += step;
        }

        Ok(chunks)
    }

    fn name(&self) -> &'static str {
        "sliding_window"
    }
}
