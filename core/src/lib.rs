//! Core engagement engine for the Rust air-defense simulator.
//!
//! Each time step flows through the row classifier, the identification
//! resolver and the run accumulator; the reporter summarises the frozen run.
//! Input sources, sinks and pacing are injected by the caller.

pub mod math;
pub mod prelude;
pub mod processing;
pub mod radar_interface;
pub mod report;
pub mod telemetry;

pub use prelude::{EngineError, EngineResult, SimulationParameters};
pub use processing::{Engine, EngineState, RunOutcome, RunState};
pub use report::RunSummary;
