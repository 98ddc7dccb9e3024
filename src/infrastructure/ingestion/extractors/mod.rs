//! Text extraction backends

mod composite;
mod pdf;
mod plain_text;

pub use composite::CompositeExtractor;
pub use pdf::PdfTextExtractor;
pub use plain_text::PlainTextExtractor;
