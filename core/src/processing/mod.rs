pub mod accumulator;
pub mod classifier;
pub mod engine;
pub mod resolver;

pub use accumulator::RunState;
pub use classifier::{Classification, RowClassifier, Verdict};
pub use engine::{Engine, EngineState, RunOutcome, PACING_INTERVAL, STEP_CEILING};
pub use resolver::{random_source, IdentificationResolver};
