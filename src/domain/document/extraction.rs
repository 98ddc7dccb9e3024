//! Raw document input and the text extraction seam

use async_trait::async_trait;
use bytes::Bytes;

#[cfg(test)]
use mockall::automock;

use crate::domain::DomainError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Document formats the extractors understand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
    Unknown,
}

impl DocumentKind {
    fn from_mime(mime: &str) -> Self {
        let essence = mime
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/pdf" | "application/x-pdf" => Self::Pdf,
            "text/plain" | "text/markdown" => Self::PlainText,
            _ => Self::Unknown,
        }
    }
}

/// An uploaded policy document, alive for one request only
#[derive(Debug, Clone)]
pub struct DocumentInput {
    bytes: Bytes,
    filename: Option<String>,
    content_type: Option<String>,
}

impl DocumentInput {
    pub fn new(bytes: impl Into<Bytes>) -> Self {
        Self {
            bytes: bytes.into(),
            filename: None,
            content_type: None,
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Resolve the format from the declared content type, the filename
    /// extension, then the leading bytes.
    pub fn kind(&self) -> DocumentKind {
        if let Some(kind) = self
            .content_type
            .as_deref()
            .map(DocumentKind::from_mime)
            .filter(|k| *k != DocumentKind::Unknown)
        {
            return kind;
        }

        if let Some(kind) = self
            .filename
            .as_deref()
            .and_then(|name| mime_guess::from_path(name).first())
            .map(|mime| DocumentKind::from_mime(mime.essence_str()))
            .filter(|k| *k != DocumentKind::Unknown)
        {
            return kind;
        }

        if self.bytes.starts_with(PDF_MAGIC) {
            DocumentKind::Pdf
        } else {
            DocumentKind::Unknown
        }
    }
}

/// Turns document bytes into plain text
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract the full text; unreadable input is an `Extraction` error
    async fn extract(&self, document: &DocumentInput) -> Result<String, DomainError>;
}
