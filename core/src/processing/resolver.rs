use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Builds the single random stream shared by every draw of one run.
pub fn random_source(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Decides whether a detected hostile is identified, with probability Pk.
#[derive(Debug, Clone, Copy)]
pub struct IdentificationResolver {
    kill_probability: f64,
}

impl IdentificationResolver {
    pub fn new(kill_probability: f64) -> Self {
        Self { kill_probability }
    }

    /// Draws once from `rng` only when `detected`; a clear step never
    /// consumes a draw, keeping the sequence aligned to detections.
    pub fn resolve<R: Rng + ?Sized>(&self, detected: bool, rng: &mut R) -> bool {
        if !detected {
            return false;
        }
        let draw: f64 = rng.gen();
        draw < self.kill_probability
    }
}
