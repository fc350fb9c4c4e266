//! Pattern table construction over fixed-length digit windows.
//!
//! For every window of `W` consecutive digits in the training sequence, the
//! builder records the size category of the digit that followed. Two
//! resolution policies exist across the upstream dashboard revisions and both
//! are supported as an explicit build mode:
//!
//! - [`TablePolicy::Strict`]: a signature is retained only if *every*
//!   occurrence in training was followed by the same category.
//! - [`TablePolicy::Majority`]: the most frequent following category is
//!   retained, ties broken by the first category to reach the maximum count.
//!
//! # Example
//!
//! ```
//! use predecir::pattern::PatternTable;
//! use predecir::primitives::{Category, Signature, TrainingSequence};
//!
//! let seq = TrainingSequence::from_digits(&[1, 2, 3, 4, 5, 6, 7]).unwrap();
//! let mut table = PatternTable::new();
//! table.fit(&seq).unwrap();
//!
//! // The single window 123456 was followed by 7 (BIG).
//! assert_eq!(table.len(), 1);
//! let key = Signature::from_digits(&[1, 2, 3, 4, 5, 6]).unwrap();
//! assert_eq!(table.predict(&key), Some(Category::Big));
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{PredecirError, Result};
use crate::primitives::{Category, Signature, TrainingSequence};
use crate::traits::SequenceModel;

/// Window length used by the upstream dashboards.
pub const DEFAULT_WINDOW: usize = 6;

/// Policy for resolving the recorded next-categories of a signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TablePolicy {
    /// Retain a signature only if every occurrence was followed by the same
    /// category (the window deterministically predicted one outcome in the
    /// observed history).
    #[default]
    Strict,
    /// Retain the most frequent following category; on a tie, the first
    /// category to reach the maximum count in occurrence order wins.
    Majority,
}

/// Lookup table mapping a window signature to a predicted category.
///
/// Pure function of the training sequence: fitting has no side effects
/// beyond replacing the table's own entries. Signatures never observed have
/// no entry, and looking them up is not an error.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatternTable {
    window: usize,
    policy: TablePolicy,
    entries: HashMap<Signature, Category>,
}

impl PatternTable {
    /// Creates an unfitted table with the default window (6) and the strict
    /// policy.
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            policy: TablePolicy::default(),
            entries: HashMap::new(),
        }
    }

    /// Sets the window length used for training and lookups.
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Sets the resolution policy.
    #[must_use]
    pub fn with_policy(mut self, policy: TablePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The configured resolution policy.
    #[must_use]
    pub fn policy(&self) -> TablePolicy {
        self.policy
    }

    /// Fits the table to a training sequence, replacing any prior entries.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` if no window-plus-outcome pair can be
    /// formed (`sequence.len() <= window`). The existing entries are left
    /// untouched in that case.
    pub fn fit(&mut self, sequence: &TrainingSequence) -> Result<()> {
        let n = sequence.len();
        if n <= self.window {
            return Err(PredecirError::insufficient_data(n, self.window));
        }

        let observations = sequence.observations();
        let mut outcomes: HashMap<Signature, Vec<Category>> = HashMap::new();
        for i in 0..n - self.window {
            let signature = Signature::from_observations(&observations[i..i + self.window]);
            let next = observations[i + self.window].category();
            outcomes.entry(signature).or_default().push(next);
        }

        let mut entries = HashMap::with_capacity(outcomes.len());
        for (signature, seen) in outcomes {
            match self.policy {
                TablePolicy::Strict => {
                    let first = seen[0];
                    if seen.iter().all(|&c| c == first) {
                        entries.insert(signature, first);
                    }
                }
                TablePolicy::Majority => {
                    entries.insert(signature, leading_category(&seen));
                }
            }
        }

        self.entries = entries;
        Ok(())
    }

    /// Looks up the category predicted for a window signature.
    ///
    /// Returns `None` for signatures never retained; callers surface this as
    /// WAIT.
    #[must_use]
    pub fn predict(&self, signature: &Signature) -> Option<Category> {
        self.entries.get(signature).copied()
    }

    /// The window length this table keys on.
    #[must_use]
    pub fn window(&self) -> usize {
        self.window
    }

    /// Number of retained signatures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no signatures were retained.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over the retained (signature, category) entries.
    pub fn iter(&self) -> impl Iterator<Item = (&Signature, Category)> {
        self.entries.iter().map(|(sig, &cat)| (sig, cat))
    }
}

impl Default for PatternTable {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceModel for PatternTable {
    type Prediction = Category;

    fn fit(&mut self, sequence: &TrainingSequence) -> Result<()> {
        PatternTable::fit(self, sequence)
    }

    fn predict(&self, signature: &Signature) -> Option<Category> {
        PatternTable::predict(self, signature)
    }

    fn window(&self) -> usize {
        self.window
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// First category to reach the maximum occurrence count, scanning in
/// occurrence order.
fn leading_category(seen: &[Category]) -> Category {
    let mut bigs = 0usize;
    let mut smalls = 0usize;
    let mut best = seen[0];
    let mut best_count = 0usize;
    for &category in seen {
        let count = match category {
            Category::Big => {
                bigs += 1;
                bigs
            }
            Category::Small => {
                smalls += 1;
                smalls
            }
        };
        if count > best_count {
            best = category;
            best_count = count;
        }
    }
    best
}
