//! Best-score persistence seam.
//!
//! The engine persists exactly one value: the best final score so far.
//! Hosts back it with whatever keyed storage they have; the in-memory
//! implementation covers tests and throwaway sessions.

use serde::{Deserialize, Serialize};

/// Storage for the single best-score value.
pub trait ScoreStore {
    /// Best final score on record. 0 when nothing has been stored yet.
    fn high_score(&self) -> u32;

    /// Persist a new best score.
    ///
    /// The engine only calls this with values that beat the current
    /// record. Writes are best-effort: the engine never retries.
    fn set_high_score(&mut self, score: u32);
}

/// Score store held in memory, starting at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemoryScoreStore {
    best: u32,
}

impl InMemoryScoreStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with an existing record.
    #[must_use]
    pub fn with_high_score(score: u32) -> Self {
        Self { best: score }
    }
}

impl ScoreStore for InMemoryScoreStore {
    fn high_score(&self) -> u32 {
        self.best
    }

    fn set_high_score(&mut self, score: u32) {
        self.best = score;
    }
}
