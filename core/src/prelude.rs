use serde::{Deserialize, Serialize};

/// Parameters fixed for the whole lifetime of one engagement run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SimulationParameters {
    /// Probability that a detected hostile is identified and neutralized.
    pub kill_probability: f64,
    /// Throttle every time step to the wall-clock pacing interval.
    #[serde(default)]
    pub real_time: bool,
    /// Seed for the identification draws; `None` draws from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl SimulationParameters {
    pub fn new(kill_probability: f64, real_time: bool, seed: Option<u64>) -> EngineResult<Self> {
        let params = Self {
            kill_probability,
            real_time,
            seed,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> EngineResult<()> {
        if !self.kill_probability.is_finite() || !(0.0..=1.0).contains(&self.kill_probability) {
            return Err(EngineError::InvalidParameter(format!(
                "kill probability {} is outside [0, 1]",
                self.kill_probability
            )));
        }
        Ok(())
    }
}

/// Common error type for the engagement engine.
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("input unavailable: {0}")]
    InputUnavailable(String),
    #[error("invalid token at position {position}: empty after trimming")]
    InvalidToken { position: usize },
    #[error("sink unavailable: {0}")]
    SinkUnavailable(String),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("internal failure: {0}")]
    Internal(String),
}

pub type EngineResult<T> = Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameters_accept_probability_bounds() {
        assert!(SimulationParameters::new(0.0, false, None).is_ok());
        assert!(SimulationParameters::new(1.0, true, Some(7)).is_ok());
    }

    #[test]
    fn parameters_reject_out_of_range_probability() {
        for pk in [-0.1, 1.5, f64::NAN, f64::INFINITY] {
            let err = SimulationParameters::new(pk, false, None).unwrap_err();
            assert!(matches!(err, EngineError::InvalidParameter(_)));
        }
    }
}
