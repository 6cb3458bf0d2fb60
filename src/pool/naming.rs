//! Cosmetic worker labels.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const FALLBACK_NAME: &str = "Worker";

/// Draws display names from a roster.
///
/// Names may repeat; workers are told apart by id. A fixed seed makes the
/// sequence reproducible.
#[derive(Debug, Clone)]
pub struct WorkerNamer {
    roster: Vec<String>,
    rng: StdRng,
}

impl WorkerNamer {
    pub fn new(roster: Vec<String>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self { roster, rng }
    }

    /// Picks the next label.
    pub fn next_name(&mut self) -> String {
        if self.roster.is_empty() {
            return FALLBACK_NAME.to_string();
        }
        let i = self.rng.random_range(0..self.roster.len());
        self.roster[i].clone()
    }
}
