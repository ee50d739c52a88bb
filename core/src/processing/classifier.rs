use crate::prelude::{EngineError, EngineResult};
use crate::radar_interface::TimeStepRow;
use serde::{Deserialize, Serialize};

/// Outcome of classifying one radar sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Hostile,
    Clear,
}

/// Parity of a token, read from its final character only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    Odd,
    Even,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub odd: usize,
    pub even: usize,
    /// Tokens that were empty after trimming and contributed to neither count.
    pub malformed: usize,
    pub verdict: Verdict,
}

impl Classification {
    pub fn is_hostile(&self) -> bool {
        self.verdict == Verdict::Hostile
    }
}

/// Inspects the trailing character of a trimmed token. `'0'` is even, any
/// other character is odd; the digit itself is never validated.
pub fn inspect_token(position: usize, token: &str) -> EngineResult<Parity> {
    match token.trim().chars().last() {
        Some('0') => Ok(Parity::Even),
        Some(_) => Ok(Parity::Odd),
        None => Err(EngineError::InvalidToken { position }),
    }
}

/// Bit-parity heuristic: a row is hostile iff strictly more tokens are odd
/// than even.
#[derive(Debug, Clone, Copy, Default)]
pub struct RowClassifier;

impl RowClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, row: &TimeStepRow) -> Classification {
        let (mut odd, mut even, mut malformed) = (0, 0, 0);
        for (position, token) in row.tokens.iter().enumerate() {
            match inspect_token(position, token) {
                Ok(Parity::Odd) => odd += 1,
                Ok(Parity::Even) => even += 1,
                Err(_) => malformed += 1,
            }
        }

        let verdict = if odd > even {
            Verdict::Hostile
        } else {
            Verdict::Clear
        };

        Classification {
            odd,
            even,
            malformed,
            verdict,
        }
    }
}
