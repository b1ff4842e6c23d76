//! Input and output records.

use super::date::DueDate;
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default effort estimate when none is given.
pub(crate) const DEFAULT_HOURS: f64 = 1.0;

/// Smallest effort estimate considered; lower values are raised to this.
pub(crate) const MIN_HOURS: f64 = 0.1;

/// Default importance rating when none is given.
pub(crate) const DEFAULT_IMPORTANCE: i64 = 5;

/// A task to be prioritized.
///
/// # Examples
///
/// ```
/// use u_taskrank::task::Task;
///
/// let task = Task::new("Write release notes")
///     .with_id("notes")
///     .with_due_text("2025-07-01")
///     .with_hours(2.5)
///     .with_importance(7)
///     .with_dependencies(["changelog"]);
///
/// assert_eq!(task.effective_id(0), "notes");
/// assert_eq!(task.importance(), 7);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct Task {
    /// Identifier referenced by other tasks' `dependencies`.
    ///
    /// `None` means the task's position in the batch is used instead.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub id: Option<String>,

    /// Display title. Not interpreted.
    pub title: String,

    /// Optional due date.
    pub due_date: Option<DueDate>,

    /// Effort estimate in hours. Defaults to 1.0, floored at 0.1.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub estimated_hours: Option<f64>,

    /// Importance rating. Defaults to 5, clamped to `[1, 10]`.
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub importance: Option<i64>,

    /// Ids of tasks in the same batch this task depends on.
    pub dependencies: Vec<String>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_due_date(mut self, date: NaiveDate) -> Self {
        self.due_date = Some(DueDate::Date(date));
        self
    }

    pub fn with_due_text(mut self, text: impl Into<String>) -> Self {
        self.due_date = Some(DueDate::Text(text.into()));
        self
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub fn with_importance(mut self, importance: i64) -> Self {
        self.importance = Some(importance);
        self
    }

    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Returns the id used for dependency resolution: the explicit id, or
    /// the stringified batch position.
    pub fn effective_id(&self, index: usize) -> String {
        match &self.id {
            Some(id) => id.clone(),
            None => index.to_string(),
        }
    }

    /// Effort estimate after defaulting and flooring.
    ///
    /// Non-finite or negative estimates never propagate: `NaN` and anything
    /// below 0.1 become 0.1.
    pub fn hours(&self) -> f64 {
        self.estimated_hours.unwrap_or(DEFAULT_HOURS).max(MIN_HOURS)
    }

    /// Importance after defaulting and clamping to `[1, 10]`.
    pub fn importance(&self) -> i64 {
        self.importance.unwrap_or(DEFAULT_IMPORTANCE).clamp(1, 10)
    }

    /// Resolved due date, or `None` if absent or unparseable.
    pub fn due(&self) -> Option<NaiveDate> {
        self.due_date.as_ref().and_then(DueDate::resolve)
    }
}

/// A task with its composite score and justification.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoredTask {
    /// The task, with `due_date` normalized to a calendar date or `None`.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub task: Task,

    /// Composite priority score, rounded to 4 decimals. Higher ranks first.
    pub score: f64,

    /// Reasons joined with `"; "`. Never empty.
    pub reason: String,
}

/// Batch-level facts computed once per scoring call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatchMeta {
    /// Whether the dependency graph contains a directed cycle.
    pub cycle_detected: bool,
}

/// Ranked output of a scoring call.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScoringResult {
    /// Tasks sorted by descending score; ties keep input order.
    pub tasks: Vec<ScoredTask>,

    /// Batch metadata.
    pub meta: BatchMeta,
}

/// A top-ranked task with a rendered explanation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Suggestion {
    pub task: ScoredTask,
    pub explanation: String,
}

/// The head of a ranking, rendered as suggestions.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SuggestionSet {
    pub suggestions: Vec<Suggestion>,
    pub meta: BatchMeta,
}
