//! Multi-factor task scoring.
//!
//! Every task gets four normalized component values, combined by a
//! weighted sum:
//!
//! - **Urgency**: time pressure from the due date; overdue tasks exceed 1.
//! - **Importance**: the caller's 1-10 rating scaled to `[0.1, 1]`.
//! - **Effort**: quick-win value, `1 / sqrt(hours)` capped at 1.
//! - **Dependency**: share of the batch this task blocks.
//!
//! Weights come from a named [`Strategy`] profile (or caller-supplied
//! [`Weights`]). [`TaskScorer`] runs the dependency analysis once per
//! batch, composes the components through a [`CompositeEngine`], attaches
//! a reason string and returns tasks ranked by descending score.
//!
//! # Design
//!
//! [`CompositeEngine`] and [`ScoreComponent`] are generic over the item
//! and context types; the task-specific pieces live in `components` and
//! `scorer`.

mod components;
mod config;
mod engine;
mod scorer;
mod strategy;
mod types;

pub use components::{
    dependency_pressure, effort, importance, urgency, DependencyPressure, Effort, Importance,
    Urgency, OVERDUE_SATURATION_DAYS, URGENCY_HORIZON_DAYS,
};
pub use config::ScorerConfig;
pub use engine::{round_to, CompositeEngine};
pub use scorer::{
    build_reason, explain, score_tasks, TaskScorer, REASON_BALANCED, REASON_HIGH_IMPORTANCE,
    REASON_PAST_DUE, REASON_QUICK_WIN, SCORE_PRECISION,
};
pub use strategy::{resolve_weights, Strategy, WeightPrecedence, Weights};
pub use types::{BatchContext, ScoreComponent, TaskFacts};
