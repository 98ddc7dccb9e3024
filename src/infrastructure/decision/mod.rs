//! Model-backed decision synthesis and response assembly

mod assembler;
pub mod prompts;
mod step;
mod synthesizer;

pub use assembler::{build_justification, ResponseAssembler};
pub use step::{PromptRunner, SynthesisStep};
pub use synthesizer::DecisionSynthesizer;
