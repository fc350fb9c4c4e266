//! Error types for Predecir operations.
//!
//! Provides rich error context for library consumers.

use std::fmt;

/// Main error type for Predecir operations.
///
/// Covers dataset format problems, training sequences too short to form a
/// single window, and invalid live input. Table lookup misses are *not*
/// errors; they resolve to a WAIT call at the session level.
///
/// # Examples
///
/// ```
/// use predecir::error::PredecirError;
///
/// let err = PredecirError::InsufficientData {
///     n_observations: 4,
///     window: 6,
/// };
/// assert!(err.to_string().contains("4 observations"));
/// ```
#[derive(Debug)]
pub enum PredecirError {
    /// Required column/field missing or unparseable in the training dataset.
    DataFormat {
        /// What was wrong with the input
        message: String,
    },

    /// Training sequence too short to form a single window.
    ///
    /// Callers should treat this as "table is empty", not a hard failure:
    /// every later prediction simply resolves to WAIT.
    InsufficientData {
        /// Number of observations supplied
        n_observations: usize,
        /// Window length requested
        window: usize,
    },

    /// A live input digit outside `[0, 9]`.
    InvalidDigit {
        /// The rejected value
        value: u8,
    },

    /// Session operation that requires trained tables was called before
    /// training (or after a reset).
    NotTrained,

    /// I/O error (file not found, permission denied, etc.).
    Io(std::io::Error),

    /// Generic error with string message.
    Other(String),
}

impl fmt::Display for PredecirError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredecirError::DataFormat { message } => {
                write!(f, "Invalid dataset format: {message}")
            }
            PredecirError::InsufficientData {
                n_observations,
                window,
            } => {
                write!(
                    f,
                    "Insufficient data: {n_observations} observations cannot form a window of {window}"
                )
            }
            PredecirError::InvalidDigit { value } => {
                write!(f, "Invalid digit: {value} is outside 0..=9")
            }
            PredecirError::NotTrained => {
                write!(f, "Session not trained: no tables are installed")
            }
            PredecirError::Io(e) => write!(f, "I/O error: {e}"),
            PredecirError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PredecirError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PredecirError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for PredecirError {
    fn from(err: std::io::Error) -> Self {
        PredecirError::Io(err)
    }
}

impl From<&str> for PredecirError {
    fn from(msg: &str) -> Self {
        PredecirError::Other(msg.to_string())
    }
}

impl From<String> for PredecirError {
    fn from(msg: String) -> Self {
        PredecirError::Other(msg)
    }
}

impl PredecirError {
    /// Create a dataset format error with descriptive context
    #[must_use]
    pub fn data_format(message: impl Into<String>) -> Self {
        Self::DataFormat {
            message: message.into(),
        }
    }

    /// Create an insufficient-data error for a window that cannot be formed
    #[must_use]
    pub fn insufficient_data(n_observations: usize, window: usize) -> Self {
        Self::InsufficientData {
            n_observations,
            window,
        }
    }

    /// True if this error means "no window could be formed".
    ///
    /// Sessions map this case to empty tables rather than failing training.
    #[must_use]
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, Self::InsufficientData { .. })
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, PredecirError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_format_display() {
        let err = PredecirError::data_format("missing 'number' column");
        assert!(err.to_string().contains("Invalid dataset format"));
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn test_insufficient_data_display() {
        let err = PredecirError::insufficient_data(3, 6);
        let msg = err.to_string();
        assert!(msg.contains("3 observations"));
        assert!(msg.contains("window of 6"));
    }

    #[test]
    fn test_invalid_digit_display() {
        let err = PredecirError::InvalidDigit { value: 12 };
        assert!(err.to_string().contains("12"));
        assert!(err.to_string().contains("0..=9"));
    }

    #[test]
    fn test_not_trained_display() {
        let err = PredecirError::NotTrained;
        assert!(err.to_string().contains("not trained"));
    }

    #[test]
    fn test_from_str() {
        let err: PredecirError = "test error".into();
        assert!(matches!(err, PredecirError::Other(_)));
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_from_string() {
        let err: PredecirError = "test error".to_string().into();
        assert!(matches!(err, PredecirError::Other(_)));
        assert_eq!(err.to_string(), "test error");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PredecirError = io_err.into();
        assert!(matches!(err, PredecirError::Io(_)));
    }

    #[test]
    fn test_error_source_io() {
        use std::error::Error;
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = PredecirError::Io(io_err);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_error_source_other() {
        use std::error::Error;
        let err = PredecirError::Other("test".to_string());
        assert!(err.source().is_none());
    }

    #[test]
    fn test_is_insufficient_data() {
        assert!(PredecirError::insufficient_data(0, 6).is_insufficient_data());
        assert!(!PredecirError::NotTrained.is_insufficient_data());
    }
}
