use serde::{Deserialize, Serialize};

/// Per-step trace entry emitted by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepRecord {
    /// 1-based time step index.
    pub step: usize,
    pub tokens: Vec<String>,
    pub odd: usize,
    pub even: usize,
    pub malformed: usize,
    pub detected: bool,
    pub identified: bool,
}

impl StepRecord {
    pub fn new(
        step: usize,
        tokens: Vec<String>,
        odd: usize,
        even: usize,
        malformed: usize,
        detected: bool,
        identified: bool,
    ) -> Self {
        Self {
            step,
            tokens,
            odd,
            even,
            malformed,
            detected,
            identified,
        }
    }
}
