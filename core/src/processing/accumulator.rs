use serde::{Deserialize, Serialize};

/// Running totals for one engagement run.
///
/// Owned by exactly one run and threaded through the driving loop; each call
/// to [`RunState::record_step`] advances it by one time step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunState {
    steps_processed: usize,
    hostiles_detected: usize,
    hostiles_identified: usize,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Trusts the caller that `identified` implies `detected`.
    pub fn record_step(&mut self, detected: bool, identified: bool) {
        self.steps_processed += 1;
        if detected {
            self.hostiles_detected += 1;
        }
        if identified {
            self.hostiles_identified += 1;
        }
    }

    pub fn steps_processed(&self) -> usize {
        self.steps_processed
    }

    pub fn hostiles_detected(&self) -> usize {
        self.hostiles_detected
    }

    pub fn hostiles_identified(&self) -> usize {
        self.hostiles_identified
    }
}
