//! High score tracking
//!
//! Lives in memory for as long as the page (or process) does; nothing is
//! written to storage.

use serde::{Deserialize, Serialize};

/// Best score and a little history for the menu
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScore {
    best: u64,
    last: Option<u64>,
    runs: u32,
}

impl HighScore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run. Returns true if it beat the previous best.
    pub fn record(&mut self, score: u64) -> bool {
        self.runs += 1;
        self.last = Some(score);
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Best score so far (0 before any run)
    pub fn best(&self) -> u64 {
        self.best
    }

    /// Score of the most recent run
    pub fn last(&self) -> Option<u64> {
        self.last
    }

    /// Number of finished runs
    pub fn runs(&self) -> u32 {
        self.runs
    }

    /// Nothing worth showing yet
    pub fn is_empty(&self) -> bool {
        self.best == 0
    }
}
