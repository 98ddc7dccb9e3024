//! Decision entities and the parsing rules applied to model output

pub mod parsing;
pub mod record;
pub mod status;

pub use parsing::{normalize_reason, parse_amount};
pub use record::{DecisionRecord, FinalResponse};
pub use status::DecisionStatus;
