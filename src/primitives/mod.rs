//! Core domain types for digit sequences.
//!
//! These types provide the foundation for both prediction engines: digits,
//! their derived size categories, window signatures used as table keys, and
//! the immutable training sequence both builders consume.

use std::fmt;
use std::str::FromStr;

use serde::de::Error as SerdeError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{PredecirError, Result};

/// Outcome category derived from a digit: BIG for 5..=9, SMALL for 0..=4.
///
/// # Examples
///
/// ```
/// use predecir::primitives::Category;
///
/// assert_eq!(Category::from_digit(7), Category::Big);
/// assert_eq!(Category::from_digit(4), Category::Small);
/// assert_eq!(Category::Big.to_string(), "BIG");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Digit in 0..=4
    Small,
    /// Digit in 5..=9
    Big,
}

impl Category {
    /// Derives the category from a digit. Values above 9 are still mapped
    /// (anything >= 5 is BIG); digit validation happens in [`Observation`].
    #[must_use]
    pub fn from_digit(digit: u8) -> Self {
        if digit >= 5 {
            Category::Big
        } else {
            Category::Small
        }
    }

    /// The upstream display literal ("BIG" / "SMALL").
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Big => "BIG",
            Category::Small => "SMALL",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single recorded digit with its size category.
///
/// The category is normally derived from the digit; datasets that carry an
/// explicit size label (triplet encodings) may override it via
/// [`Observation::with_category`]. Immutable once constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    digit: u8,
    category: Category,
}

impl Observation {
    /// Creates an observation with the category derived from the digit.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDigit` if `digit > 9`.
    pub fn new(digit: u8) -> Result<Self> {
        if digit > 9 {
            return Err(PredecirError::InvalidDigit { value: digit });
        }
        Ok(Self {
            digit,
            category: Category::from_digit(digit),
        })
    }

    /// Creates an observation with an explicit category label, as carried by
    /// triplet-encoded datasets.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDigit` if `digit > 9`.
    pub fn with_category(digit: u8, category: Category) -> Result<Self> {
        if digit > 9 {
            return Err(PredecirError::InvalidDigit { value: digit });
        }
        Ok(Self { digit, category })
    }

    /// The raw digit in 0..=9.
    #[must_use]
    pub fn digit(&self) -> u8 {
        self.digit
    }

    /// The size category recorded for this observation.
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }
}

/// A fixed-length window of digits used as a lookup key.
///
/// This is the single canonical key type for both tables, regardless of how
/// the source dataset encoded its windows (concatenated strings or numeric
/// tuples). Equality and hashing are by digit content.
///
/// Serializes as its concatenated digit string (e.g. `"123456"`), which also
/// keeps JSON snapshots of fitted tables readable.
///
/// # Examples
///
/// ```
/// use predecir::primitives::Signature;
///
/// let sig = Signature::from_digits(&[1, 2, 3, 4, 5, 6]).unwrap();
/// assert_eq!(sig.len(), 6);
/// assert_eq!(sig.to_string(), "123456");
/// assert_eq!("123456".parse::<Signature>().unwrap(), sig);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    digits: Box<[u8]>,
}

impl Signature {
    /// Creates a signature from raw digits.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDigit` if any value is above 9.
    pub fn from_digits(digits: &[u8]) -> Result<Self> {
        for &d in digits {
            if d > 9 {
                return Err(PredecirError::InvalidDigit { value: d });
            }
        }
        Ok(Self {
            digits: digits.into(),
        })
    }

    /// Creates a signature from already-validated observations.
    #[must_use]
    pub fn from_observations(observations: &[Observation]) -> Self {
        Self {
            digits: observations.iter().map(Observation::digit).collect(),
        }
    }

    /// Window length of this signature.
    #[must_use]
    pub fn len(&self) -> usize {
        self.digits.len()
    }

    /// True for the zero-length signature.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.digits.is_empty()
    }

    /// The digits of the window, oldest first.
    #[must_use]
    pub fn digits(&self) -> &[u8] {
        &self.digits
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for d in &*self.digits {
            write!(f, "{d}")?;
        }
        Ok(())
    }
}

impl FromStr for Signature {
    type Err = PredecirError;

    fn from_str(s: &str) -> Result<Self> {
        let mut digits = Vec::with_capacity(s.len());
        for c in s.chars() {
            let d = c
                .to_digit(10)
                .ok_or_else(|| PredecirError::data_format(format!("non-digit character '{c}' in signature")))?;
            digits.push(d as u8);
        }
        Ok(Self {
            digits: digits.into(),
        })
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(|e: PredecirError| D::Error::custom(e.to_string()))
    }
}

/// An ordered, immutable sequence of observations parsed from a dataset.
///
/// Source of truth for both table builders; never mutated after parsing.
///
/// # Examples
///
/// ```
/// use predecir::primitives::{Category, TrainingSequence};
///
/// let seq = TrainingSequence::from_digits(&[1, 2, 3, 4, 5, 6, 7]).unwrap();
/// assert_eq!(seq.len(), 7);
/// assert_eq!(seq.observations()[6].category(), Category::Big);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TrainingSequence {
    observations: Vec<Observation>,
}

impl TrainingSequence {
    /// Wraps already-validated observations.
    #[must_use]
    pub fn new(observations: Vec<Observation>) -> Self {
        Self { observations }
    }

    /// Builds a sequence from raw digits, deriving each category.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDigit` if any value is above 9.
    pub fn from_digits(digits: &[u8]) -> Result<Self> {
        let observations = digits
            .iter()
            .map(|&d| Observation::new(d))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { observations })
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observations.len()
    }

    /// True if the sequence holds no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    /// The observations, oldest first.
    #[must_use]
    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    /// The raw digits, oldest first.
    #[must_use]
    pub fn digits(&self) -> Vec<u8> {
        self.observations.iter().map(Observation::digit).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_digit_boundary() {
        assert_eq!(Category::from_digit(0), Category::Small);
        assert_eq!(Category::from_digit(4), Category::Small);
        assert_eq!(Category::from_digit(5), Category::Big);
        assert_eq!(Category::from_digit(9), Category::Big);
    }

    #[test]
    fn test_category_display() {
        assert_eq!(Category::Big.to_string(), "BIG");
        assert_eq!(Category::Small.to_string(), "SMALL");
    }

    #[test]
    fn test_observation_derives_category() {
        let obs = Observation::new(7).expect("valid digit");
        assert_eq!(obs.digit(), 7);
        assert_eq!(obs.category(), Category::Big);
    }

    #[test]
    fn test_observation_rejects_out_of_range() {
        let err = Observation::new(10).unwrap_err();
        assert!(matches!(err, PredecirError::InvalidDigit { value: 10 }));
    }

    #[test]
    fn test_observation_with_explicit_label() {
        // Triplet datasets may label a digit against its derived size.
        let obs = Observation::with_category(7, Category::Small).expect("valid digit");
        assert_eq!(obs.category(), Category::Small);
    }

    #[test]
    fn test_signature_from_digits() {
        let sig = Signature::from_digits(&[0, 9, 3]).expect("valid digits");
        assert_eq!(sig.len(), 3);
        assert_eq!(sig.digits(), &[0, 9, 3]);
        assert_eq!(sig.to_string(), "093");
    }

    #[test]
    fn test_signature_rejects_invalid_digit() {
        assert!(Signature::from_digits(&[1, 2, 42]).is_err());
    }

    #[test]
    fn test_signature_parse_roundtrip() {
        let sig: Signature = "123456".parse().expect("all digits");
        assert_eq!(sig, Signature::from_digits(&[1, 2, 3, 4, 5, 6]).expect("valid"));
    }

    #[test]
    fn test_signature_parse_rejects_non_digit() {
        let err = "12a4".parse::<Signature>().unwrap_err();
        assert!(err.to_string().contains("non-digit"));
    }

    #[test]
    fn test_signature_equality_by_content() {
        let a = Signature::from_digits(&[1, 2, 3]).expect("valid");
        let b: Signature = "123".parse().expect("valid");
        assert_eq!(a, b);
    }

    #[test]
    fn test_signature_serde_as_string() {
        let sig = Signature::from_digits(&[1, 2, 3, 4, 5, 6]).expect("valid");
        let json = serde_json::to_string(&sig).expect("serialize");
        assert_eq!(json, "\"123456\"");
        let back: Signature = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, sig);
    }

    #[test]
    fn test_training_sequence_from_digits() {
        let seq = TrainingSequence::from_digits(&[1, 2, 3]).expect("valid");
        assert_eq!(seq.len(), 3);
        assert_eq!(seq.digits(), vec![1, 2, 3]);
    }

    #[test]
    fn test_training_sequence_rejects_invalid_digit() {
        assert!(TrainingSequence::from_digits(&[1, 2, 99]).is_err());
    }

    #[test]
    fn test_training_sequence_empty() {
        let seq = TrainingSequence::default();
        assert!(seq.is_empty());
        assert_eq!(seq.len(), 0);
    }
}
