//! Infrastructure layer - External service implementations

pub mod decision;
pub mod embedding;
pub mod index;
pub mod ingestion;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod services;
