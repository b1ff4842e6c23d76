//! Core trait for score components and the inputs they read.

use chrono::NaiveDate;

/// A scoring rule that assigns a priority value to an item.
///
/// Components return `f64` values where **higher is higher priority**.
/// Values are normalized to roughly `[0, 1]` so that weights are
/// comparable; a component may exceed 1 to express an override (overdue
/// urgency does).
///
/// # Type Parameters
///
/// * `T` - The item type being scored
/// * `C` - The context type providing batch-level state
///
/// # Examples
///
/// ```
/// use u_taskrank::scoring::{BatchContext, ScoreComponent, TaskFacts};
///
/// // Favour tasks with short titles
/// struct Brevity;
///
/// impl ScoreComponent<TaskFacts, BatchContext> for Brevity {
///     fn name(&self) -> &str { "brevity" }
///     fn score(&self, task: &TaskFacts, _ctx: &BatchContext) -> f64 {
///         1.0 / (1.0 + task.hours)
///     }
/// }
/// ```
pub trait ScoreComponent<T, C>: Send + Sync {
    /// Returns the name of this component.
    fn name(&self) -> &str;

    /// Computes the component value for the given item.
    ///
    /// Higher values indicate higher priority.
    fn score(&self, item: &T, context: &C) -> f64;
}

/// A task reduced to the already-clamped facts the components read.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskFacts {
    /// Position in the input batch.
    pub position: usize,

    /// Resolved due date.
    pub due: Option<NaiveDate>,

    /// Effort estimate in hours, at least 0.1.
    pub hours: f64,

    /// Importance in `[1, 10]`.
    pub importance: i64,

    /// Number of tasks in the batch this one blocks.
    pub blocking: usize,
}

/// Batch-level state shared by every component evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchContext {
    /// Reference date for urgency.
    pub today: NaiveDate,

    /// Number of tasks in the batch.
    pub batch_size: usize,
}
