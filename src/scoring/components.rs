//! The four score components.
//!
//! Each is a pure function plus a [`ScoreComponent`] adapter so the
//! composition engine can weight them uniformly.

use super::types::{BatchContext, ScoreComponent, TaskFacts};
use crate::task::types::MIN_HOURS;
use chrono::NaiveDate;

/// Days over which a future due date decays from urgency 1 to 0.
pub const URGENCY_HORIZON_DAYS: f64 = 60.0;

/// Days overdue at which the overdue boost saturates.
pub const OVERDUE_SATURATION_DAYS: f64 = 30.0;

/// Time pressure from a due date.
///
/// - No due date: `0.0`.
/// - Overdue: `1 + min(days_overdue / 30, 1)`, in `[1, 2]`. Every overdue
///   task outranks every task that is not.
/// - Otherwise: `max(0, 1 - days_until_due / 60)`. Due today is `1.0`.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_taskrank::scoring::urgency;
///
/// let today = NaiveDate::from_ymd_opt(2025, 5, 1).unwrap();
/// let in_30 = NaiveDate::from_ymd_opt(2025, 5, 31).unwrap();
/// assert!((urgency(Some(in_30), today) - 0.5).abs() < 1e-12);
/// assert_eq!(urgency(None, today), 0.0);
/// ```
pub fn urgency(due: Option<NaiveDate>, today: NaiveDate) -> f64 {
    let Some(due) = due else {
        return 0.0;
    };
    let days = (due - today).num_days();
    if days < 0 {
        1.0 + (days.unsigned_abs() as f64 / OVERDUE_SATURATION_DAYS).min(1.0)
    } else {
        (1.0 - days as f64 / URGENCY_HORIZON_DAYS).max(0.0)
    }
}

/// Quick-win value of an effort estimate: `min(1, 1 / sqrt(hours))`.
///
/// Hours are floored at 0.1. Anything up to one hour scores 1.0; beyond
/// that the value decays by inverse square root, so moderate tasks are
/// not punished as hard as a direct inverse would.
pub fn effort(hours: f64) -> f64 {
    let h = hours.max(MIN_HOURS);
    (1.0 / h.sqrt()).min(1.0)
}

/// Importance rating clamped to `[1, 10]` and scaled to `[0.1, 1.0]`.
pub fn importance(raw: i64) -> f64 {
    raw.clamp(1, 10) as f64 / 10.0
}

/// Share of the batch blocked by a task: `min(1, blocking / max(1, batch_size))`.
pub fn dependency_pressure(blocking: usize, batch_size: usize) -> f64 {
    (blocking as f64 / batch_size.max(1) as f64).min(1.0)
}

/// Urgency component.
pub struct Urgency;

impl ScoreComponent<TaskFacts, BatchContext> for Urgency {
    fn name(&self) -> &str {
        "urgency"
    }

    fn score(&self, task: &TaskFacts, ctx: &BatchContext) -> f64 {
        urgency(task.due, ctx.today)
    }
}

/// Importance component.
pub struct Importance;

impl ScoreComponent<TaskFacts, BatchContext> for Importance {
    fn name(&self) -> &str {
        "importance"
    }

    fn score(&self, task: &TaskFacts, _ctx: &BatchContext) -> f64 {
        importance(task.importance)
    }
}

/// Effort (quick win) component.
pub struct Effort;

impl ScoreComponent<TaskFacts, BatchContext> for Effort {
    fn name(&self) -> &str {
        "effort"
    }

    fn score(&self, task: &TaskFacts, _ctx: &BatchContext) -> f64 {
        effort(task.hours)
    }
}

/// Dependency pressure component.
pub struct DependencyPressure;

impl ScoreComponent<TaskFacts, BatchContext> for DependencyPressure {
    fn name(&self) -> &str {
        "dependency"
    }

    fn score(&self, task: &TaskFacts, ctx: &BatchContext) -> f64 {
        dependency_pressure(task.blocking, ctx.batch_size)
    }
}
