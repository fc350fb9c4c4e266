//! Core traits for sequence models.
//!
//! These traits define the API contract both prediction engines implement.

use crate::error::Result;
use crate::primitives::{Signature, TrainingSequence};

/// A lookup-table model trained over sliding windows of a digit sequence.
///
/// Implementors follow fit/predict conventions: `fit` consumes the training
/// sequence once, `predict` is a pure read-only lookup afterwards. A `None`
/// prediction means the signature was never observed during training; callers
/// surface it as a WAIT state, never as an error.
///
/// # Examples
///
/// ```
/// use predecir::prelude::*;
///
/// let seq = TrainingSequence::from_digits(&[1, 2, 3, 4, 5, 6, 7, 8]).unwrap();
/// let mut table = PatternTable::new();
/// table.fit(&seq).unwrap();
///
/// let window = Signature::from_digits(&[1, 2, 3, 4, 5, 6]).unwrap();
/// assert_eq!(table.predict(&window), Some(Category::Big));
/// ```
pub trait SequenceModel {
    /// The value predicted for a known window signature.
    type Prediction;

    /// Fits the model to a training sequence.
    ///
    /// # Errors
    ///
    /// Returns `InsufficientData` if the sequence cannot form a single
    /// window-plus-outcome pair. Callers should treat that case as an empty
    /// table, not a hard failure.
    fn fit(&mut self, sequence: &TrainingSequence) -> Result<()>;

    /// Looks up the prediction for a window signature.
    ///
    /// Returns `None` for signatures never observed during training.
    fn predict(&self, signature: &Signature) -> Option<Self::Prediction>;

    /// The window length this model keys on.
    fn window(&self) -> usize;

    /// Number of signatures retained in the fitted table.
    fn len(&self) -> usize;

    /// True if the fitted table holds no signatures.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::primitives::Category;

    // Minimal model to exercise the trait's default method.
    struct SingleEntry {
        fitted: bool,
    }

    impl SequenceModel for SingleEntry {
        type Prediction = Category;

        fn fit(&mut self, _sequence: &TrainingSequence) -> Result<()> {
            self.fitted = true;
            Ok(())
        }

        fn predict(&self, _signature: &Signature) -> Option<Category> {
            self.fitted.then_some(Category::Big)
        }

        fn window(&self) -> usize {
            1
        }

        fn len(&self) -> usize {
            usize::from(self.fitted)
        }
    }

    #[test]
    fn test_is_empty_default_method() {
        let mut model = SingleEntry { fitted: false };
        assert!(model.is_empty());

        let seq = TrainingSequence::from_digits(&[1, 2]).expect("valid");
        model.fit(&seq).expect("fit should succeed");
        assert!(!model.is_empty());
        assert_eq!(model.len(), 1);
    }

    #[test]
    fn test_predict_before_fit_is_none() {
        let model = SingleEntry { fitted: false };
        let sig = Signature::from_digits(&[3]).expect("valid");
        assert_eq!(model.predict(&sig), None);
    }
}
