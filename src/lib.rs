//! Dependency-aware task prioritization.
//!
//! Ranks a batch of tasks by a composite priority score and explains each
//! rank:
//!
//! - **Task model** (`task`): lenient input records with optional ids, due
//!   dates, effort estimates, importance ratings and dependencies.
//! - **Dependency graph** (`graph`): cycle detection and blocking degree
//!   over the batch's dependency references.
//! - **Scoring** (`scoring`): urgency, importance, effort and dependency
//!   components combined by a named weight strategy, with reason strings
//!   and stable descending ranking.
//! - **Payload** (`payload`, `serde` feature): JSON normalization with
//!   structured validation errors, and JSON rendering of results.
//!
//! # Architecture
//!
//! Scoring is a pure function of its input batch. Nothing is cached or
//! shared between calls, so independent batches can be scored
//! concurrently; the `parallel` feature does so on the rayon pool.
//!
//! ```
//! use chrono::NaiveDate;
//! use u_taskrank::scoring::{ScorerConfig, TaskScorer};
//! use u_taskrank::task::Task;
//!
//! let scorer = TaskScorer::new(
//!     ScorerConfig::default().with_today(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()),
//! )
//! .unwrap();
//!
//! let tasks = vec![
//!     Task::new("Design schema").with_id("schema").with_importance(9),
//!     Task::new("Write migrations").with_id("mig").with_dependencies(["schema"]),
//! ];
//! let ranked = scorer.score(&tasks, "high_impact", None);
//! assert_eq!(ranked.tasks[0].task.title, "Design schema");
//! ```

pub mod error;
pub mod graph;
#[cfg(feature = "serde")]
pub mod payload;
pub mod scoring;
pub mod task;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::TaskRankError;
