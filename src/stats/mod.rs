//! Win/loss streak bookkeeping for prediction engines.
//!
//! Each engine carries one [`EngineStats`] value, mutated exactly once per
//! live round in which that engine had a prediction. Rounds without a
//! prediction (WAIT) leave the statistics untouched.
//!
//! # Example
//!
//! ```
//! use predecir::stats::{EngineStats, RoundResult};
//!
//! let mut stats = EngineStats::new();
//! stats.record(RoundResult::Win);
//! stats.record(RoundResult::Win);
//! stats.record(RoundResult::Loss);
//!
//! assert_eq!(stats.wins(), 2);
//! assert_eq!(stats.losses(), 1);
//! assert_eq!(stats.streak(), 1); // the loss reset the run
//! assert_eq!(stats.max_win(), 2);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of a decided round: the engine's call matched the actual
/// category, or it did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundResult {
    /// Predicted category matched the observed digit's category.
    Win,
    /// Predicted category did not match.
    Loss,
}

impl RoundResult {
    /// The upstream display literal ("WIN" / "LOSS").
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            RoundResult::Win => "WIN",
            RoundResult::Loss => "LOSS",
        }
    }
}

impl fmt::Display for RoundResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rolling win/loss statistics for a single engine.
///
/// State machine per engine: no result yet, then a run of consecutive
/// identical results whose length is `streak`. A result different from the
/// previous one resets the run to length 1. `max_win` and `max_loss` track
/// the longest run of each kind and never decrease except on [`reset`].
///
/// [`reset`]: EngineStats::reset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineStats {
    wins: u32,
    losses: u32,
    streak: u32,
    last_result: Option<RoundResult>,
    max_win: u32,
    max_loss: u32,
}

impl EngineStats {
    /// Creates zeroed statistics with no recorded result.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a decided round and returns the post-update streak length.
    ///
    /// Only called for rounds where the engine actually had a prediction.
    pub fn record(&mut self, result: RoundResult) -> u32 {
        match result {
            RoundResult::Win => self.wins += 1,
            RoundResult::Loss => self.losses += 1,
        }

        if self.last_result == Some(result) {
            self.streak += 1;
        } else {
            self.streak = 1;
            self.last_result = Some(result);
        }

        match result {
            RoundResult::Win => self.max_win = self.max_win.max(self.streak),
            RoundResult::Loss => self.max_loss = self.max_loss.max(self.streak),
        }

        self.streak
    }

    /// Fraction of decided rounds that were wins; 0.0 before any decision.
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        let decided = self.wins + self.losses;
        if decided == 0 {
            0.0
        } else {
            f64::from(self.wins) / f64::from(decided)
        }
    }

    /// Total rounds this engine won.
    #[must_use]
    pub fn wins(&self) -> u32 {
        self.wins
    }

    /// Total rounds this engine lost.
    #[must_use]
    pub fn losses(&self) -> u32 {
        self.losses
    }

    /// Length of the current run of identical results (0 before any).
    #[must_use]
    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// The result of the most recent decided round, if any.
    #[must_use]
    pub fn last_result(&self) -> Option<RoundResult> {
        self.last_result
    }

    /// Longest win run observed so far.
    #[must_use]
    pub fn max_win(&self) -> u32 {
        self.max_win
    }

    /// Longest loss run observed so far.
    #[must_use]
    pub fn max_loss(&self) -> u32 {
        self.max_loss
    }

    /// Clears all counters and forgets the last result.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
