//! Live play session owning both engines and all rolling state.
//!
//! A [`Session`] is the explicit owner of everything the dashboards keep in
//! page state: the two fitted tables, the live digit sequence, per-engine
//! win/loss statistics, and the round history. One user, one session; each
//! [`Session::observe`] call is an atomic request/update cycle and there is
//! no shared state between sessions.
//!
//! # Example
//!
//! ```
//! use predecir::prelude::*;
//!
//! let data = TrainingSequence::from_digits(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
//! let mut session = Session::new();
//! session.train(&data).unwrap();
//!
//! // Sync the opening window, then play a round.
//! session.seed(&[1, 2, 3, 4, 5, 6]).unwrap();
//! assert_eq!(session.outlook().pattern, Call::Category(Category::Big));
//!
//! let record = session.observe(7).unwrap();
//! assert_eq!(record.pattern.result, Some(RoundResult::Win));
//! assert_eq!(session.stats(Engine::Pattern).wins(), 1);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{PredecirError, Result};
use crate::frequency::FrequencyModel;
use crate::history::{Call, EngineRound, History, HistoryRecord};
use crate::pattern::{PatternTable, TablePolicy};
use crate::primitives::{Category, Observation, Signature, TrainingSequence};
use crate::stats::{EngineStats, RoundResult};

/// Identifies one of the two prediction engines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Engine {
    /// The fixed-window pattern table (category calls).
    Pattern,
    /// The frequency model (digit calls).
    Frequency,
}

/// How session-level statistics are attributed.
///
/// Some dashboard revisions keep one statistics block per engine; others
/// drive a single block off one engine's results while still displaying both
/// engines' calls. Both behaviors are exposed; the caller chooses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatsMode {
    /// Each engine tracks its own statistics.
    #[default]
    PerEngine,
    /// A single statistics block additionally tracks the chosen engine's
    /// results (per-engine statistics are still maintained for the history).
    Unified(Engine),
}

/// Both engines' calls for the upcoming round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outlook {
    /// Pattern engine's call (category or WAIT).
    pub pattern: Call,
    /// Frequency engine's call (digit or WAIT).
    pub frequency: Call,
}

/// A single user's prediction session.
///
/// Owns the tables, the live sequence, statistics, and history. Reset
/// returns everything to the untrained, empty state.
#[derive(Debug, Clone)]
pub struct Session {
    pattern: PatternTable,
    frequency: FrequencyModel,
    trained: bool,
    live: Vec<Observation>,
    pattern_stats: EngineStats,
    frequency_stats: EngineStats,
    unified_stats: EngineStats,
    mode: StatsMode,
    history: History,
}

impl Session {
    /// Creates an untrained session with default windows (6/6), the strict
    /// table policy, and per-engine statistics.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pattern: PatternTable::new(),
            frequency: FrequencyModel::new(),
            trained: false,
            live: Vec::new(),
            pattern_stats: EngineStats::new(),
            frequency_stats: EngineStats::new(),
            unified_stats: EngineStats::new(),
            mode: StatsMode::default(),
            history: History::new(),
        }
    }

    /// Sets the pattern table's resolution policy.
    #[must_use]
    pub fn with_policy(mut self, policy: TablePolicy) -> Self {
        self.pattern = self.pattern.with_policy(policy);
        self
    }

    /// Sets the pattern table's window length.
    #[must_use]
    pub fn with_pattern_window(mut self, window: usize) -> Self {
        self.pattern = self.pattern.with_window(window);
        self
    }

    /// Sets the frequency model's window length.
    #[must_use]
    pub fn with_frequency_window(mut self, window: usize) -> Self {
        self.frequency = self.frequency.with_window(window);
        self
    }

    /// Sets the statistics attribution mode.
    #[must_use]
    pub fn with_stats_mode(mut self, mode: StatsMode) -> Self {
        self.mode = mode;
        self
    }

    /// Trains both engines from a parsed sequence.
    ///
    /// Sequences too short to form a window leave the corresponding table
    /// empty (every later call is WAIT) rather than failing. Tables are
    /// installed atomically: a failed build leaves the session in its
    /// pre-training state.
    ///
    /// # Errors
    ///
    /// Currently only propagates non-`InsufficientData` build failures.
    pub fn train(&mut self, sequence: &TrainingSequence) -> Result<()> {
        let mut pattern = PatternTable::new()
            .with_window(self.pattern.window())
            .with_policy(self.pattern.policy());
        if let Err(e) = pattern.fit(sequence) {
            if !e.is_insufficient_data() {
                return Err(e);
            }
        }

        let mut frequency = FrequencyModel::new().with_window(self.frequency.window());
        if let Err(e) = frequency.fit(sequence) {
            if !e.is_insufficient_data() {
                return Err(e);
            }
        }

        self.pattern = pattern;
        self.frequency = frequency;
        self.trained = true;
        Ok(())
    }

    /// Installs the opening live window in one step (the dashboards' "sync
    /// last N numbers" action).
    ///
    /// # Errors
    ///
    /// Fails if the session is untrained, the live sequence was already
    /// started, the digit count differs from the pattern window, or any
    /// digit is outside 0..=9. The live sequence is untouched on failure.
    pub fn seed(&mut self, digits: &[u8]) -> Result<()> {
        if !self.trained {
            return Err(PredecirError::NotTrained);
        }
        if !self.live.is_empty() {
            return Err(PredecirError::Other(
                "live sequence already initialized".to_string(),
            ));
        }
        if digits.len() != self.pattern.window() {
            return Err(PredecirError::Other(format!(
                "seed requires exactly {} digits, got {}",
                self.pattern.window(),
                digits.len()
            )));
        }

        let observations = digits
            .iter()
            .map(|&d| Observation::new(d))
            .collect::<Result<Vec<_>>>()?;
        self.live = observations;
        Ok(())
    }

    /// Both engines' calls for the upcoming round.
    ///
    /// Insufficient live history and signatures never seen in training both
    /// resolve to [`Call::Wait`]; an untrained or reset session therefore
    /// reports WAIT for both engines.
    #[must_use]
    pub fn outlook(&self) -> Outlook {
        Outlook {
            pattern: self
                .trailing_signature(self.pattern.window())
                .and_then(|sig| self.pattern.predict(&sig))
                .map_or(Call::Wait, Call::Category),
            frequency: self
                .trailing_signature(self.frequency.window())
                .and_then(|sig| self.frequency.predict(&sig))
                .map_or(Call::Wait, Call::Digit),
        }
    }

    /// Plays one round: settles both engines' calls against the revealed
    /// digit, updates statistics and history, then appends the digit to the
    /// live sequence (so it counts toward the *next* round's window).
    ///
    /// Engines without a call this round are untouched; the record shows
    /// WAIT for them.
    ///
    /// # Errors
    ///
    /// Fails on an untrained session or a digit outside 0..=9, with no state
    /// change.
    pub fn observe(&mut self, digit: u8) -> Result<HistoryRecord> {
        if !self.trained {
            return Err(PredecirError::NotTrained);
        }
        let observation = Observation::new(digit)?;
        let actual = observation.category();
        let outlook = self.outlook();

        let pattern = Self::settle(&mut self.pattern_stats, outlook.pattern, actual);
        let frequency = Self::settle(&mut self.frequency_stats, outlook.frequency, actual);

        if let StatsMode::Unified(engine) = self.mode {
            let settled = match engine {
                Engine::Pattern => pattern,
                Engine::Frequency => frequency,
            };
            if let Some(result) = settled.result {
                self.unified_stats.record(result);
            }
        }

        let record = HistoryRecord {
            round: self.history.len() as u32 + 1,
            digit,
            category: actual,
            pattern,
            frequency,
        };
        self.history.prepend(record.clone());
        self.live.push(observation);
        Ok(record)
    }

    /// Clears everything: tables, live sequence, statistics, and history.
    /// The session returns to the untrained state and every call is WAIT.
    pub fn reset(&mut self) {
        self.pattern = PatternTable::new()
            .with_window(self.pattern.window())
            .with_policy(self.pattern.policy());
        self.frequency = FrequencyModel::new().with_window(self.frequency.window());
        self.trained = false;
        self.live.clear();
        self.pattern_stats.reset();
        self.frequency_stats.reset();
        self.unified_stats.reset();
        self.history.clear();
    }

    /// True once [`Session::train`] has succeeded (and until reset).
    #[must_use]
    pub fn is_trained(&self) -> bool {
        self.trained
    }

    /// Read-only view of the fitted pattern table.
    #[must_use]
    pub fn pattern_table(&self) -> &PatternTable {
        &self.pattern
    }

    /// Read-only view of the fitted frequency model.
    #[must_use]
    pub fn frequency_model(&self) -> &FrequencyModel {
        &self.frequency
    }

    /// The live digits observed so far, oldest first.
    #[must_use]
    pub fn live_digits(&self) -> Vec<u8> {
        self.live.iter().map(Observation::digit).collect()
    }

    /// Per-engine statistics snapshot.
    #[must_use]
    pub fn stats(&self, engine: Engine) -> &EngineStats {
        match engine {
            Engine::Pattern => &self.pattern_stats,
            Engine::Frequency => &self.frequency_stats,
        }
    }

    /// The unified statistics block, present only in
    /// [`StatsMode::Unified`].
    #[must_use]
    pub fn unified_stats(&self) -> Option<&EngineStats> {
        match self.mode {
            StatsMode::Unified(_) => Some(&self.unified_stats),
            StatsMode::PerEngine => None,
        }
    }

    /// Fraction of decided rounds the engine won; 0.0 before any decision.
    #[must_use]
    pub fn win_rate(&self, engine: Engine) -> f64 {
        self.stats(engine).win_rate()
    }

    /// The configured statistics mode.
    #[must_use]
    pub fn stats_mode(&self) -> StatsMode {
        self.mode
    }

    /// Round history, most recent first.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The trailing window of the live sequence, if enough digits exist.
    fn trailing_signature(&self, window: usize) -> Option<Signature> {
        if window == 0 || self.live.len() < window {
            return None;
        }
        Some(Signature::from_observations(
            &self.live[self.live.len() - window..],
        ))
    }

    /// Settles one engine's call against the actual category, updating its
    /// statistics only when a call existed.
    fn settle(stats: &mut EngineStats, call: Call, actual: Category) -> EngineRound {
        match call.category() {
            None => EngineRound::wait(),
            Some(predicted) => {
                let result = if predicted == actual {
                    RoundResult::Win
                } else {
                    RoundResult::Loss
                };
                let streak = stats.record(result);
                EngineRound {
                    call,
                    result: Some(result),
                    streak: Some(streak),
                }
            }
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trained_session() -> Session {
        // Windows over [1..=8]: 123456 -> 7 (BIG), 234567 -> 8 (BIG).
        let data = TrainingSequence::from_digits(&[1, 2, 3, 4, 5, 6, 7, 8]).expect("valid");
        let mut session = Session::new();
        session.train(&data).expect("train");
        session
    }

    #[test]
    fn test_untrained_session_waits() {
        let session = Session::new();
        let outlook = session.outlook();
        assert!(outlook.pattern.is_wait());
        assert!(outlook.frequency.is_wait());
    }

    #[test]
    fn test_observe_requires_training() {
        let mut session = Session::new();
        let err = session.observe(3).unwrap_err();
        assert!(matches!(err, PredecirError::NotTrained));
    }

    #[test]
    fn test_seed_requires_training() {
        let mut session = Session::new();
        let err = session.seed(&[1, 2, 3, 4, 5, 6]).unwrap_err();
        assert!(matches!(err, PredecirError::NotTrained));
    }

    #[test]
    fn test_seed_length_must_match_window() {
        let mut session = trained_session();
        assert!(session.seed(&[1, 2, 3]).is_err());
        assert!(session.live_digits().is_empty());
    }

    #[test]
    fn test_seed_rejects_invalid_digit() {
        let mut session = trained_session();
        assert!(session.seed(&[1, 2, 3, 4, 5, 61]).is_err());
        assert!(session.live_digits().is_empty());
    }

    #[test]
    fn test_seed_twice_is_rejected() {
        let mut session = trained_session();
        session.seed(&[1, 2, 3, 4, 5, 6]).expect("first seed");
        assert!(session.seed(&[1, 2, 3, 4, 5, 6]).is_err());
    }

    #[test]
    fn test_win_round_after_seed() {
        // Seed the exact window the training data opened with, reveal 7.
        let mut session = trained_session();
        session.seed(&[1, 2, 3, 4, 5, 6]).expect("seed");

        assert_eq!(session.outlook().pattern, Call::Category(Category::Big));
        assert_eq!(session.outlook().frequency, Call::Digit(7));

        let record = session.observe(7).expect("observe");
        assert_eq!(record.round, 1);
        assert_eq!(record.category, Category::Big);
        assert_eq!(record.pattern.result, Some(RoundResult::Win));
        assert_eq!(record.frequency.result, Some(RoundResult::Win));
        assert_eq!(session.stats(Engine::Pattern).wins(), 1);
        assert_eq!(session.stats(Engine::Frequency).wins(), 1);
    }

    #[test]
    fn test_observed_digit_extends_next_window() {
        let mut session = trained_session();
        session.seed(&[1, 2, 3, 4, 5, 6]).expect("seed");
        session.observe(7).expect("observe");

        // Trailing window is now 234567, trained to predict 8 (BIG).
        assert_eq!(session.outlook().pattern, Call::Category(Category::Big));
        assert_eq!(session.outlook().frequency, Call::Digit(8));
        assert_eq!(session.live_digits(), vec![1, 2, 3, 4, 5, 6, 7]);
    }

    #[test]
    fn test_wait_round_leaves_statistics_unchanged() {
        let mut session = trained_session();
        session.seed(&[9, 9, 9, 9, 9, 9]).expect("seed");

        // 999999 was never seen in training.
        assert!(session.outlook().pattern.is_wait());
        let record = session.observe(5).expect("observe");

        assert!(record.pattern.call.is_wait());
        assert_eq!(record.pattern.result, None);
        assert_eq!(record.pattern.streak, None);
        assert_eq!(session.stats(Engine::Pattern), &EngineStats::new());
        assert_eq!(session.stats(Engine::Frequency), &EngineStats::new());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_insufficient_live_history_waits() {
        let mut session = trained_session();
        // No seed: observe straight away with an empty live sequence.
        let record = session.observe(1).expect("observe");
        assert!(record.pattern.call.is_wait());
        assert!(record.frequency.call.is_wait());
    }

    #[test]
    fn test_loss_round() {
        let mut session = trained_session();
        session.seed(&[1, 2, 3, 4, 5, 6]).expect("seed");

        // Engines call BIG / 7; a 2 (SMALL) decides against both.
        let record = session.observe(2).expect("observe");
        assert_eq!(record.pattern.result, Some(RoundResult::Loss));
        assert_eq!(record.frequency.result, Some(RoundResult::Loss));
        assert_eq!(session.stats(Engine::Pattern).losses(), 1);
        assert_eq!(session.stats(Engine::Pattern).max_loss(), 1);
    }

    #[test]
    fn test_streak_sequence_win_win_loss() {
        // 11 always precedes 7, 17 is contradicted (strict policy drops
        // it), and 71 never occurs: after a seed of [1, 1] the pattern
        // engine calls BIG exactly when the window lands back on 1, 1.
        let data =
            TrainingSequence::from_digits(&[1, 1, 7, 5, 1, 1, 7, 2, 1, 1, 7]).expect("valid");
        let mut session = Session::new().with_pattern_window(2).with_frequency_window(2);
        session.train(&data).expect("train");
        session.seed(&[1, 1]).expect("seed");

        let r1 = session.observe(7).expect("round 1"); // WIN, streak 1
        assert_eq!(r1.pattern.streak, Some(1));

        // Live tail is 1, 7 then 7, 1, both WAIT for the pattern engine,
        // until the window walks back onto 1, 1.
        session.observe(1).expect("wait round");
        session.observe(1).expect("wait round");
        let r2 = session.observe(7).expect("round 2"); // WIN, streak 2
        assert_eq!(r2.pattern.streak, Some(2));

        session.observe(1).expect("wait round");
        session.observe(1).expect("wait round");
        let r3 = session.observe(2).expect("round 3"); // LOSS, streak resets
        assert_eq!(r3.pattern.result, Some(RoundResult::Loss));
        assert_eq!(r3.pattern.streak, Some(1));

        let stats = session.stats(Engine::Pattern);
        assert_eq!(stats.max_win(), 2);
        assert!(stats.max_loss() >= 1);
    }

    #[test]
    fn test_history_is_most_recent_first() {
        let mut session = trained_session();
        session.seed(&[1, 2, 3, 4, 5, 6]).expect("seed");
        session.observe(7).expect("round 1");
        session.observe(8).expect("round 2");

        let records = session.history().records();
        assert_eq!(records[0].round, 2);
        assert_eq!(records[1].round, 1);
    }

    #[test]
    fn test_unified_mode_tracks_chosen_engine() {
        let data = TrainingSequence::from_digits(&[1, 2, 3, 4, 5, 6, 7, 8]).expect("valid");
        let mut session = Session::new().with_stats_mode(StatsMode::Unified(Engine::Pattern));
        session.train(&data).expect("train");
        session.seed(&[1, 2, 3, 4, 5, 6]).expect("seed");
        session.observe(7).expect("observe");

        let unified = session.unified_stats().expect("unified mode");
        assert_eq!(unified.wins(), 1);
        // Per-engine statistics are still maintained alongside.
        assert_eq!(session.stats(Engine::Pattern).wins(), 1);
    }

    #[test]
    fn test_per_engine_mode_has_no_unified_block() {
        let session = trained_session();
        assert!(session.unified_stats().is_none());
    }

    #[test]
    fn test_win_rate() {
        let mut session = trained_session();
        assert_eq!(session.win_rate(Engine::Pattern), 0.0);
        session.seed(&[1, 2, 3, 4, 5, 6]).expect("seed");
        session.observe(7).expect("win");
        assert!((session.win_rate(Engine::Pattern) - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_train_on_short_sequence_leaves_empty_tables() {
        let data = TrainingSequence::from_digits(&[1, 2, 3]).expect("valid");
        let mut session = Session::new();
        session.train(&data).expect("train");

        assert!(session.is_trained());
        assert!(session.pattern_table().is_empty());
        assert!(session.frequency_model().is_empty());
        assert!(session.outlook().pattern.is_wait());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = trained_session();
        session.seed(&[1, 2, 3, 4, 5, 6]).expect("seed");
        session.observe(7).expect("observe");

        session.reset();

        assert!(!session.is_trained());
        assert!(session.pattern_table().is_empty());
        assert!(session.frequency_model().is_empty());
        assert!(session.live_digits().is_empty());
        assert!(session.history().is_empty());
        assert_eq!(session.stats(Engine::Pattern), &EngineStats::new());
        assert_eq!(session.stats(Engine::Frequency), &EngineStats::new());
        assert!(session.outlook().pattern.is_wait());
        assert!(session.outlook().frequency.is_wait());
    }

    #[test]
    fn test_round_numbers_restart_after_reset() {
        let mut session = trained_session();
        session.seed(&[1, 2, 3, 4, 5, 6]).expect("seed");
        session.observe(7).expect("observe");
        session.reset();

        let data = TrainingSequence::from_digits(&[1, 2, 3, 4, 5, 6, 7, 8]).expect("valid");
        session.train(&data).expect("retrain");
        let record = session.observe(3).expect("observe");
        assert_eq!(record.round, 1);
    }

    #[test]
    fn test_observe_rejects_invalid_digit() {
        let mut session = trained_session();
        let err = session.observe(10).unwrap_err();
        assert!(matches!(err, PredecirError::InvalidDigit { value: 10 }));
        assert!(session.history().is_empty());
        assert!(session.live_digits().is_empty());
    }

    #[test]
    fn test_replay_reproduces_final_statistics() {
        let play = |digits: &[u8]| -> (u32, u32, u32, u32) {
            let mut session = trained_session();
            session.seed(&[1, 2, 3, 4, 5, 6]).expect("seed");
            for &d in digits {
                session.observe(d).expect("observe");
            }
            let stats = session.stats(Engine::Pattern);
            (stats.wins(), stats.losses(), stats.max_win(), stats.max_loss())
        };

        let digits = [7, 8, 2, 5, 9, 1];
        assert_eq!(play(&digits), play(&digits));
    }
}
