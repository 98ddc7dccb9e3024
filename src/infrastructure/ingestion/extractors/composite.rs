//! Format-dispatching extractor

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::{PdfTextExtractor, PlainTextExtractor};
use crate::domain::document::{DocumentInput, DocumentKind, TextExtractor};
use crate::domain::DomainError;

/// Routes each document to the extractor for its detected format
pub struct CompositeExtractor {
    pdf: Arc<dyn TextExtractor>,
    plain_text: Arc<dyn TextExtractor>,
}

impl CompositeExtractor {
    pub fn new() -> Self {
        Self::with_extractors(
            Arc::new(PdfTextExtractor::new()),
            Arc::new(PlainTextExtractor::new()),
        )
    }

    pub fn with_extractors(
        pdf: Arc<dyn TextExtractor>,
        plain_text: Arc<dyn TextExtractor>,
    ) -> Self {
        Self { pdf, plain_text }
    }
}

impl Default for CompositeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for CompositeExtractor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompositeExtractor").finish_non_exhaustive()
    }
}

#[async_trait]
impl TextExtractor for CompositeExtractor {
    async fn extract(&self, document: &DocumentInput) -> Result<String, DomainError> {
        match document.kind() {
            DocumentKind::Pdf => self.pdf.extract(document).await,
            DocumentKind::PlainText => self.plain_text.extract(document).await,
            DocumentKind::Unknown => Err(DomainError::extraction(format!(
                "Unsupported document type{}",
                document
                    .content_type()
                    .map(|ct| format!(": {}", ct))
                    .unwrap_or_default()
            ))),
        }
    }
}
