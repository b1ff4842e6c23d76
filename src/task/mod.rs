//! Task records consumed and produced by the scorer.
//!
//! Input records ([`Task`]) are lenient: every field except `title` may be
//! absent or out of range, and the scorer clamps or defaults as needed.
//! Output records ([`ScoredTask`]) carry the normalized task alongside its
//! composite score and a human-readable reason.

mod date;
pub(crate) mod types;

pub use date::{parse_iso_date, DueDate};
pub use types::{BatchMeta, ScoredTask, ScoringResult, Suggestion, SuggestionSet, Task};
