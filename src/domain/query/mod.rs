//! Query understanding - structured extraction and search-term reformulation

pub mod reformulator;
pub mod structured;

pub use reformulator::reformulate;
pub use structured::StructuredQuery;
