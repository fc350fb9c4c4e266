//! Frequency model over short digit windows.
//!
//! The second prediction engine: for every window in the training sequence
//! the builder counts which raw digit followed, and keeps the most frequent
//! one per signature. Unlike the pattern table this always applies majority
//! vote (never the strict unanimity filter) and predicts the specific digit;
//! the size category is derived from that digit only at prediction time.
//!
//! Tie-break is explicit and deterministic: the first digit to reach the
//! maximum occurrence count while scanning occurrences in order wins.
//!
//! # Example
//!
//! ```
//! use predecir::frequency::FrequencyModel;
//! use predecir::primitives::{Category, Signature, TrainingSequence};
//!
//! let seq = TrainingSequence::from_digits(&[1, 2, 3, 4, 5, 6, 7]).unwrap();
//! let mut model = FrequencyModel::new();
//! model.fit(&seq).unwrap();
//!
//! let key = Signature::from_digits(&[1, 2, 3, 4, 5, 6]).unwrap();
//! assert_eq!(model.predict(&key), Some(7));
//! assert_eq!(model.predict_category(&key), Some(Category::Big));
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{PredecirError, Result};
use crate::primitives::{Category, Signature, TrainingSequence};
use crate::traits::SequenceModel;

/// Default window length; the tuple-keyed dashboard revisions use 2.
pub const DEFAULT_WINDOW: usize = 6;

/// Lookup table mapping a window signature to the most frequent following
/// digit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyModel {
    window: usize,
    entries: HashMap<Signature, u8>,
}

impl FrequencyModel {
    /// Creates an unfitted model with the default window (6).
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: DEFAULT_WINDOW,
            entries: HashMap::new(),
        }
    }

    /// Sets the window length used for training and lookups.
    #[must_use]
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Fits the model to a training sequence, replacing any prior entries.
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
        let mut followers: HashMap<Signature, Vec<u8>> = HashMap::new();
        for i in 0..n - self.window {
            let signature = Signature::from_observations(&observations[i..i + self.window]);
            let next = observations[i + self.window].digit();
            followers.entry(signature).or_default().push(next);
        }

        self.entries = followers
            .into_iter()
            .map(|(signature, seen)| (signature, leading_digit(&seen)))
            .collect();
        Ok(())
    }

    /// Looks up the digit predicted to follow a window signature.
    ///
    /// Returns `None` for signatures never observed; callers surface this as
    /// WAIT.
    #[must_use]
    pub fn predict(&self, signature: &Signature) -> Option<u8> {
        self.entries.get(signature).copied()
    }

    /// Looks up the prediction and derives its size category.
    #[must_use]
    pub fn predict_category(&self, signature: &Signature) -> Option<Category> {
        self.predict(signature).map(Category::from_digit)
    }

    /// The window length this model keys on.
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

    /// Iterates over the retained (signature, digit) entries.
    pub fn iter(&self) -> impl Iterator<Item = (&Signature, u8)> {
        self.entries.iter().map(|(sig, &digit)| (sig, digit))
    }
}

impl Default for FrequencyModel {
    fn default() -> Self {
        Self::new()
    }
}

impl SequenceModel for FrequencyModel {
    type Prediction = u8;

    fn fit(&mut self, sequence: &TrainingSequence) -> Result<()> {
        FrequencyModel::fit(self, sequence)
    }

    fn predict(&self, signature: &Signature) -> Option<u8> {
        FrequencyModel::predict(self, signature)
    }

    fn window(&self) -> usize {
        self.window
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// First digit to reach the maximum occurrence count, scanning in occurrence
/// order.
fn leading_digit(seen: &[u8]) -> u8 {
    let mut counts = [0usize; 10];
    let mut best = seen[0];
    let mut best_count = 0usize;
    for &digit in seen {
        let slot = &mut counts[usize::from(digit)];
        *slot += 1;
        if *slot > best_count {
            best = digit;
            best_count = *slot;
        }
    }
    best
}
