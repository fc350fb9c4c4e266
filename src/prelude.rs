//! Convenience re-exports for common usage.
//!
//! # Usage
//!
//! ```
//! use predecir::prelude::*;
//! ```

pub use crate::data::{parse_number_csv, parse_triplets};
pub use crate::error::{PredecirError, Result};
pub use crate::frequency::FrequencyModel;
pub use crate::history::{Call, EngineRound, History, HistoryRecord};
pub use crate::pattern::{PatternTable, TablePolicy};
pub use crate::primitives::{Category, Observation, Signature, TrainingSequence};
pub use crate::session::{Engine, Outlook, Session, StatsMode};
pub use crate::stats::{EngineStats, RoundResult};
pub use crate::traits::SequenceModel;
