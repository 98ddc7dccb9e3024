//! Plain text extraction

use async_trait::async_trait;

use crate::domain::document::{DocumentInput, TextExtractor};
use crate::domain::DomainError;

/// Decodes UTF-8 text, dropping a leading byte-order mark
#[derive(Debug, Clone, Default)]
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PlainTextExtractor {
    async fn extract(&self, document: &DocumentInput) -> Result<String, DomainError> {
        let text = std::str::from_utf8(document.bytes())
            .map_err(|e| DomainError::extraction(format!("Document is not valid UTF-8: {}", e)))?;

        Ok(text.strip_prefix('\u{feff}').unwrap_or(text).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_decode_utf8() {
        let document = DocumentInput::new("Physiotherapy is covered.".as_bytes().to_vec());
        let text = PlainTextExtractor::new().extract(&document).await.unwrap();

        assert_eq!(text, "Physiotherapy is covered.");
    }

    #[tokio::test]
    async fn test_strips_bom() {
        let document = DocumentInput::new("\u{feff}Section 1".as_bytes().to_vec());
        let text = PlainTextExtractor::new().extract(&document).await.unwrap();

        assert_eq!(text, "Section 1");
    }

    #[tokio::test]
    async fn test_invalid_utf8() {
        let document = DocumentInput::new(vec![0xff, 0xfe, 0x00, 0xd8]);
        let err = PlainTextExtractor::new().extract(&document).await.unwrap_err();

        assert!(matches!(err, DomainError::Extraction { .. }));
    }
}
