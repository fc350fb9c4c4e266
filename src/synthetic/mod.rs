//! Synthetic digit sequences for tests, demos, and benchmarks.
//!
//! Seeded generators so that callers get reproducible sequences: the same
//! seed always yields the same digits.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::primitives::TrainingSequence;

/// Generates `len` uniform random digits from a fixed seed.
///
/// # Examples
///
/// ```
/// use predecir::synthetic::random_digits;
///
/// let a = random_digits(100, 42);
/// let b = random_digits(100, 42);
/// assert_eq!(a, b);
/// assert!(a.iter().all(|&d| d <= 9));
/// ```
#[must_use]
pub fn random_digits(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..len).map(|_| rng.gen_range(0..=9)).collect()
}

/// Generates a seeded random training sequence.
#[must_use]
pub fn random_sequence(len: usize, seed: u64) -> TrainingSequence {
    TrainingSequence::from_digits(&random_digits(len, seed))
        .expect("generated digits are always in 0..=9")
}

/// Repeats a digit pattern until `len` digits have been produced.
///
/// Useful for building sequences with guaranteed recurring windows.
///
/// # Examples
///
/// ```
/// use predecir::synthetic::cycle_digits;
///
/// assert_eq!(cycle_digits(&[1, 2, 3], 7), vec![1, 2, 3, 1, 2, 3, 1]);
/// ```
#[must_use]
pub fn cycle_digits(pattern: &[u8], len: usize) -> Vec<u8> {
    pattern.iter().copied().cycle().take(len).collect()
}
