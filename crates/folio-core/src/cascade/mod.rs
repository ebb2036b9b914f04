pub mod engine;
pub mod outcome;

pub use engine::{assemble, Orchestrator};
pub use outcome::{ExtractionResult, EXHAUSTED_REASON};
