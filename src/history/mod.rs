//! Round-by-round history of live play.
//!
//! One [`HistoryRecord`] is appended per observed digit, most recent first,
//! capturing both engines' calls, outcomes, and post-update streaks for that
//! round. The history only ever shrinks on an explicit session reset.
//!
//! [`History::to_csv`] provides the export projection the dashboards offer
//! as a download.

use std::fmt;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use crate::primitives::Category;
use crate::stats::RoundResult;

/// The call an engine made for a round.
///
/// `Wait` covers both "not enough live history for a window" and "window
/// never seen in training"; the two are externally indistinguishable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Call {
    /// No prediction was available.
    Wait,
    /// A size-category call (pattern engine).
    Category(Category),
    /// A raw-digit call (frequency engine); its category is derived.
    Digit(u8),
}

impl Call {
    /// The category this call stakes, if any.
    #[must_use]
    pub fn category(self) -> Option<Category> {
        match self {
            Call::Wait => None,
            Call::Category(category) => Some(category),
            Call::Digit(digit) => Some(Category::from_digit(digit)),
        }
    }

    /// True when no prediction was available.
    #[must_use]
    pub fn is_wait(self) -> bool {
        matches!(self, Call::Wait)
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Call::Wait => f.write_str("WAIT"),
            Call::Category(category) => write!(f, "{category}"),
            Call::Digit(digit) => write!(f, "{digit}"),
        }
    }
}

/// One engine's view of a round: its call, the outcome, and the streak
/// length right after the update.
///
/// `result` and `streak` are `None` exactly when the call was WAIT: a
/// skipped round is not a loss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineRound {
    /// What the engine called before the digit was revealed.
    pub call: Call,
    /// WIN/LOSS for decided rounds, `None` for WAIT.
    pub result: Option<RoundResult>,
    /// Post-update streak length, `None` for WAIT.
    pub streak: Option<u32>,
}

impl EngineRound {
    /// A round the engine sat out.
    #[must_use]
    pub fn wait() -> Self {
        Self {
            call: Call::Wait,
            result: None,
            streak: None,
        }
    }
}

/// Everything recorded about a single live round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// 1-based round number.
    pub round: u32,
    /// The revealed digit.
    pub digit: u8,
    /// Size category derived from the digit.
    pub category: Category,
    /// Pattern engine's call and outcome.
    pub pattern: EngineRound,
    /// Frequency engine's call and outcome.
    pub frequency: EngineRound,
}

/// Append-only round history, most recent first.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    records: Vec<HistoryRecord>,
}

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record at the front (most recent first, matching the
    /// dashboard ordering).
    pub fn prepend(&mut self, record: HistoryRecord) {
        self.records.insert(0, record);
    }

    /// Number of recorded rounds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True before any round has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records, most recent first.
    #[must_use]
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// The most recently recorded round, if any.
    #[must_use]
    pub fn latest(&self) -> Option<&HistoryRecord> {
        self.records.first()
    }

    /// Removes every record.
    pub fn clear(&mut self) {
        self.records.clear();
    }

    /// Renders the export projection: a CSV document with one row per round,
    /// most recent first. WAIT rounds show `WAIT` for the call and `-` for
    /// result and streak, matching the dashboard table.
    #[must_use]
    pub fn to_csv(&self) -> String {
        let mut out = String::from(
            "round,digit,category,pattern_call,pattern_result,pattern_streak,frequency_call,frequency_result,frequency_streak\n",
        );
        for record in &self.records {
            let _ = writeln!(
                out,
                "{},{},{},{},{},{},{},{},{}",
                record.round,
                record.digit,
                record.category,
                record.pattern.call,
                display_result(record.pattern.result),
                display_streak(record.pattern.streak),
                record.frequency.call,
                display_result(record.frequency.result),
                display_streak(record.frequency.streak),
            );
        }
        out
    }
}

fn display_result(result: Option<RoundResult>) -> &'static str {
    match result {
        Some(r) => r.as_str(),
        None => "-",
    }
}

fn display_streak(streak: Option<u32>) -> String {
    match streak {
        Some(n) => n.to_string(),
        None => "-".to_string(),
    }
}
