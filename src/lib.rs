//! Predecir: lookup-table prediction engines for digit sequences.
//!
//! Predecir consolidates the logic behind a family of "predict the next
//! digit" dashboards: two engines trained once from historical data, then
//! queried round by round against a live sequence while win/loss streaks
//! are tracked. The library is the engine; rendering, uploads, and buttons
//! belong to the caller.
//!
//! # Quick Start
//!
//! ```
//! use predecir::prelude::*;
//!
//! // Parse historical data and train both engines.
//! let csv = "number\n1\n2\n3\n4\n5\n6\n7\n8\n";
//! let data = parse_number_csv(csv).unwrap();
//!
//! let mut session = Session::new();
//! session.train(&data).unwrap();
//!
//! // Sync the opening window, then step through live digits.
//! session.seed(&[1, 2, 3, 4, 5, 6]).unwrap();
//! assert_eq!(session.outlook().pattern, Call::Category(Category::Big));
//!
//! let record = session.observe(7).unwrap();
//! assert_eq!(record.pattern.result, Some(RoundResult::Win));
//! assert_eq!(session.stats(Engine::Pattern).max_win(), 1);
//!
//! // Export the round history.
//! let csv = session.history().to_csv();
//! assert!(csv.starts_with("round,digit,category"));
//! ```
//!
//! # Modules
//!
//! - [`primitives`]: Core digit, category, signature, and sequence types
//! - [`data`]: Dataset parsing (CSV `number` column, triplet lines)
//! - [`pattern`]: Pattern table builder (strict / majority policies)
//! - [`frequency`]: Frequency model builder (majority-vote digit lookup)
//! - [`stats`]: Win/loss counters and streak bookkeeping
//! - [`history`]: Round records, most-recent-first history, CSV export
//! - [`session`]: The live session owning engines, statistics, and history
//! - [`synthetic`]: Seeded random digit sequences for tests and demos

pub mod data;
pub mod error;
pub mod frequency;
pub mod history;
pub mod pattern;
pub mod prelude;
pub mod primitives;
pub mod session;
pub mod stats;
pub mod synthetic;
pub mod traits;

pub use error::{PredecirError, Result};
pub use frequency::FrequencyModel;
pub use pattern::{PatternTable, TablePolicy};
pub use primitives::{Category, Observation, Signature, TrainingSequence};
pub use session::{Engine, Session, StatsMode};
pub use traits::SequenceModel;
