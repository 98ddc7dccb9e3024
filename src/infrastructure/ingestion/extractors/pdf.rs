//! PDF text extraction with `pdf-extract`

use std::panic::{catch_unwind, AssertUnwindSafe};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::document::{DocumentInput, TextExtractor};
use crate::domain::DomainError;

/// Extracts text from PDF bytes in memory, on the blocking pool
#[derive(Debug, Clone, Default)]
pub struct PdfTextExtractor;

impl PdfTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, document: &DocumentInput) -> Result<String, DomainError> {
        if document.is_empty() {
            return Err(DomainError::extraction("Document is empty"));
        }

        let bytes = document.bytes().clone();
        let size = bytes.len();

        // pdf-extract panics on some malformed inputs
        let result = tokio::task::spawn_blocking(move || {
            catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text_from_mem(&bytes)))
        })
        .await
        .map_err(|e| DomainError::internal(format!("PDF extraction task failed: {}", e)))?;

        let text = match result {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                return Err(DomainError::extraction(format!("Failed to read PDF: {}", e)));
            }
            Err(_) => {
                return Err(DomainError::extraction(
                    "Failed to read PDF: the file structure is not supported",
                ));
            }
        };

        debug!(bytes = size, chars = text.len(), "PDF text extracted");
        Ok(text)
    }
}
