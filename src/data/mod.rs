//! Dataset parsing for training input.
//!
//! The dashboards accept two encodings and both are handled here, before
//! anything reaches the table builders:
//!
//! - **Structured CSV** with a header naming a `number` column. Empty and
//!   non-numeric values are discarded row by row; a missing column aborts
//!   parsing.
//! - **Triplet lines** of `(number, size-code, color-code)`, either
//!   delimiter-separated or fixed-width. Size-code `B`/`b` maps to BIG,
//!   anything else to SMALL; the label is carried on the observation.
//!
//! A failed parse returns an error without producing a partial sequence, so
//! a failed training attempt leaves the session untouched.
//!
//! # Example
//!
//! ```
//! use predecir::data::parse_number_csv;
//!
//! let csv = "period,number\n1001,7\n1002,2\n1003,abc\n1004,5\n";
//! let seq = parse_number_csv(csv).unwrap();
//! assert_eq!(seq.digits(), vec![7, 2, 5]); // the bad row is dropped
//! ```

use std::fs;
use std::path::Path;

use crate::error::{PredecirError, Result};
use crate::primitives::{Category, Observation, TrainingSequence};

/// Parses CSV text with a header row containing a `number` column.
///
/// Column matching is case-insensitive. Rows whose number cell is empty,
/// non-numeric, or not a single digit are discarded, mirroring the upstream
/// coerce-and-drop cleaning.
///
/// # Errors
///
/// Returns `DataFormat` if the input is empty or no `number` column exists.
pub fn parse_number_csv(text: &str) -> Result<TrainingSequence> {
    let mut lines = text.lines();
    let header = lines
        .next()
        .ok_or_else(|| PredecirError::data_format("empty dataset"))?;

    let number_idx = header
        .split(',')
        .map(str::trim)
        .position(|c| c.eq_ignore_ascii_case("number"))
        .ok_or_else(|| PredecirError::data_format("missing 'number' column"))?;

    let mut observations = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        let Some(cell) = line.split(',').map(str::trim).nth(number_idx) else {
            continue;
        };
        if let Some(digit) = parse_digit(cell) {
            observations.push(Observation::new(digit)?);
        }
    }
    Ok(TrainingSequence::new(observations))
}

/// Parses triplet lines of `(number, size-code, color-code)`.
///
/// Lines may be comma-separated, whitespace-separated, or fixed-width (one
/// character per field). The size label is carried onto the observation:
/// `B`/`b` means BIG, anything else SMALL. Blank lines are skipped.
///
/// # Errors
///
/// Returns `DataFormat` (with the offending line number) for a line whose
/// number field is missing or not a single digit.
pub fn parse_triplets(text: &str) -> Result<TrainingSequence> {
    let mut observations = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        observations.push(parse_triplet_line(line, idx + 1)?);
    }
    Ok(TrainingSequence::new(observations))
}

/// Reads and parses a `number`-column CSV file.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, or any [`parse_number_csv`]
/// error.
pub fn load_number_csv<P: AsRef<Path>>(path: P) -> Result<TrainingSequence> {
    parse_number_csv(&fs::read_to_string(path)?)
}

/// Reads and parses a triplet-encoded file.
///
/// # Errors
///
/// Returns `Io` if the file cannot be read, or any [`parse_triplets`] error.
pub fn load_triplets<P: AsRef<Path>>(path: P) -> Result<TrainingSequence> {
    parse_triplets(&fs::read_to_string(path)?)
}

/// Coerces a cell to a digit the way the upstream numeric cleaning does:
/// integer or float spelling accepted, anything outside 0..=9 rejected.
fn parse_digit(cell: &str) -> Option<u8> {
    if cell.is_empty() {
        return None;
    }
    let value: f64 = cell.parse().ok()?;
    if value.is_finite() && value.fract() == 0.0 && (0.0..=9.0).contains(&value) {
        Some(value as u8)
    } else {
        None
    }
}

fn parse_triplet_line(line: &str, line_no: usize) -> Result<Observation> {
    let (number, size) = if line.contains(',') {
        let mut fields = line.split(',').map(str::trim);
        let number = fields.next().unwrap_or("");
        (number.to_string(), fields.next().unwrap_or("").to_string())
    } else if line.split_whitespace().count() > 1 {
        let mut fields = line.split_whitespace();
        let number = fields.next().unwrap_or("");
        (number.to_string(), fields.next().unwrap_or("").to_string())
    } else {
        // Fixed width: one character per field, e.g. "7Bg".
        let mut chars = line.chars();
        let number = chars.next().map(String::from).unwrap_or_default();
        let size = chars.next().map(String::from).unwrap_or_default();
        (number, size)
    };

    let digit = parse_digit(&number).ok_or_else(|| {
        PredecirError::data_format(format!("line {line_no}: unparseable number '{number}'"))
    })?;
    let category = if matches!(size.chars().next(), Some('B' | 'b')) {
        Category::Big
    } else {
        Category::Small
    };
    Observation::with_category(digit, category)
}
