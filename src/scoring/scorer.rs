//! Batch scoring: graph analysis, weighted composition, reasons, ranking.

use super::components::{DependencyPressure, Effort, Importance, Urgency};
use super::config::ScorerConfig;
use super::engine::CompositeEngine;
use super::strategy::{resolve_weights, Weights};
use super::types::{BatchContext, TaskFacts};
use crate::error::TaskRankError;
use crate::graph::DependencyGraph;
use crate::task::{
    BatchMeta, DueDate, ScoredTask, ScoringResult, Suggestion, SuggestionSet, Task,
};
use chrono::NaiveDate;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

/// Decimal places kept in published scores.
pub const SCORE_PRECISION: i32 = 4;

pub const REASON_PAST_DUE: &str = "Past due — needs immediate attention";
pub const REASON_QUICK_WIN: &str = "Quick win (low effort)";
pub const REASON_HIGH_IMPORTANCE: &str = "High importance";
pub const REASON_BALANCED: &str = "Balanced priority";

/// Importance at or above which a task is called out as important.
const HIGH_IMPORTANCE: i64 = 8;

/// Effort at or below which a task is called out as a quick win.
const QUICK_WIN_HOURS: f64 = 1.0;

/// Ranks task batches.
///
/// Each call builds its own dependency graph and engine from the input
/// and keeps nothing afterwards, so one scorer can serve concurrent
/// callers.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_taskrank::scoring::{ScorerConfig, TaskScorer};
/// use u_taskrank::task::Task;
///
/// let today = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
/// let scorer = TaskScorer::new(ScorerConfig::default().with_today(today)).unwrap();
///
/// let tasks = vec![
///     Task::new("Fix login bug").with_id("bug").with_due_text("2025-03-28").with_hours(3.0),
///     Task::new("Update docs").with_id("docs").with_hours(0.5).with_importance(3),
/// ];
/// let result = scorer.score(&tasks, "smart_balance", None);
///
/// assert_eq!(result.tasks[0].task.title, "Fix login bug");
/// assert!(result.tasks[0].reason.starts_with("Past due"));
/// assert!(!result.meta.cycle_detected);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TaskScorer {
    config: ScorerConfig,
}

impl TaskScorer {
    /// Creates a scorer after validating `config`.
    pub fn new(config: ScorerConfig) -> Result<Self, TaskRankError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    /// Scores and ranks one batch.
    ///
    /// `strategy` selects a named weight profile; `weights` are used as
    /// described in [`resolve_weights`]. Never fails: out-of-range fields
    /// are clamped, unparseable due dates count as absent, unknown
    /// dependency ids are ignored.
    pub fn score(
        &self,
        tasks: &[Task],
        strategy: &str,
        weights: Option<&Weights>,
    ) -> ScoringResult {
        let today = self.config.reference_date();
        let weights = resolve_weights(strategy, weights, self.config.precedence);

        let graph = DependencyGraph::build(tasks);
        let cycle_detected = graph.has_cycle();

        let facts: Vec<TaskFacts> = tasks
            .iter()
            .enumerate()
            .map(|(position, task)| {
                let due = task.due();
                if due.is_none() && task.due_date.is_some() {
                    debug!(position, "unparseable due date treated as absent");
                }
                TaskFacts {
                    position,
                    due,
                    hours: task.hours(),
                    importance: task.importance(),
                    blocking: graph.blocking_count(position),
                }
            })
            .collect();

        let ctx = BatchContext {
            today,
            batch_size: tasks.len(),
        };
        let engine = self.build_engine(&weights);
        let scores = engine.score_all(&facts, &ctx, self.config.parallel);

        let ranked: Vec<ScoredTask> = engine
            .rank(&scores)
            .into_iter()
            .map(|i| ScoredTask {
                task: normalized(&tasks[i], facts[i].due),
                score: scores[i],
                reason: build_reason(&facts[i], today),
            })
            .collect();

        debug!(
            batch_size = tasks.len(),
            strategy,
            cycle_detected,
            "scored task batch"
        );

        ScoringResult {
            tasks: ranked,
            meta: BatchMeta { cycle_detected },
        }
    }

    /// Scores a batch and returns the top entries with explanations.
    pub fn suggest(
        &self,
        tasks: &[Task],
        strategy: &str,
        weights: Option<&Weights>,
    ) -> SuggestionSet {
        let result = self.score(tasks, strategy, weights);
        let suggestions = result
            .tasks
            .into_iter()
            .take(self.config.suggestion_limit)
            .map(|task| Suggestion {
                explanation: explain(&task),
                task,
            })
            .collect();

        SuggestionSet {
            suggestions,
            meta: result.meta,
        }
    }

    /// Scores independent batches with the same strategy.
    ///
    /// With the `parallel` feature and [`ScorerConfig::parallel`] set,
    /// batches are scored on the rayon pool.
    pub fn score_batches(
        &self,
        batches: &[Vec<Task>],
        strategy: &str,
        weights: Option<&Weights>,
    ) -> Vec<ScoringResult> {
        #[cfg(feature = "parallel")]
        if self.config.parallel {
            return batches
                .par_iter()
                .map(|batch| self.score(batch, strategy, weights))
                .collect();
        }

        batches
            .iter()
            .map(|batch| self.score(batch, strategy, weights))
            .collect()
    }

    fn build_engine(&self, weights: &Weights) -> CompositeEngine<TaskFacts, BatchContext> {
        CompositeEngine::new()
            .with_component(Urgency, weights.urgency)
            .with_component(Importance, weights.importance)
            .with_component(Effort, weights.effort)
            .with_component(DependencyPressure, weights.dependency)
            .with_precision(SCORE_PRECISION)
    }
}

/// Builds the reason string for one task.
///
/// Qualifying reasons appear in a fixed order (past due, blocking, quick
/// win, high importance) joined by `"; "`. A task matching none gets
/// `"Balanced priority"`.
pub fn build_reason(facts: &TaskFacts, today: NaiveDate) -> String {
    let mut reasons: Vec<String> = Vec::with_capacity(4);

    if facts.due.is_some_and(|due| due < today) {
        reasons.push(REASON_PAST_DUE.to_string());
    }
    if facts.blocking > 0 {
        reasons.push(format!("Blocks {} task(s)", facts.blocking));
    }
    if facts.hours <= QUICK_WIN_HOURS {
        reasons.push(REASON_QUICK_WIN.to_string());
    }
    if facts.importance >= HIGH_IMPORTANCE {
        reasons.push(REASON_HIGH_IMPORTANCE.to_string());
    }

    if reasons.is_empty() {
        REASON_BALANCED.to_string()
    } else {
        reasons.join("; ")
    }
}

/// Renders the explanation attached to a suggestion.
pub fn explain(task: &ScoredTask) -> String {
    format!("Selected because: {}, score {}", task.reason, score_text(task.score))
}

/// Formats a score so whole numbers keep a fractional part (`1.0`, not `1`).
fn score_text(score: f64) -> String {
    let mut text = score.to_string();
    if score.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Scores a batch with the default configuration.
pub fn score_tasks(tasks: &[Task], strategy: &str) -> ScoringResult {
    TaskScorer::default().score(tasks, strategy, None)
}

fn normalized(task: &Task, due: Option<NaiveDate>) -> Task {
    Task {
        due_date: due.map(DueDate::Date),
        ..task.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{Strategy as Profile, WeightPrecedence};
    use chrono::Duration;
    use proptest::prelude::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 10).unwrap()
    }

    fn scorer() -> TaskScorer {
        TaskScorer::new(ScorerConfig::default().with_today(today())).unwrap()
    }

    /// A: due tomorrow, importance 8, 2h. B: two days overdue, importance
    /// 6, 5h, depends on A. C: no due date, importance 4, 0.5h.
    fn sample() -> Vec<Task> {
        let t = today();
        vec![
            Task::new("A")
                .with_id("1")
                .with_due_text((t + Duration::days(1)).to_string())
                .with_hours(2.0)
                .with_importance(8),
            Task::new("B")
                .with_id("2")
                .with_due_text((t - Duration::days(2)).to_string())
                .with_hours(5.0)
                .with_importance(6)
                .with_dependencies(["1"]),
            Task::new("C").with_id("3").with_hours(0.5).with_importance(4),
        ]
    }

    fn find<'a>(result: &'a ScoringResult, title: &str) -> &'a ScoredTask {
        result
            .tasks
            .iter()
            .find(|t| t.task.title == title)
            .unwrap()
    }

    #[test]
    fn test_sample_batch() {
        let result = scorer().score(&sample(), "smart_balance", None);

        assert_eq!(result.tasks.len(), 3);
        assert!(!result.meta.cycle_detected);
        assert!(result.tasks.iter().all(|t| !t.reason.is_empty()));

        // A: .35*(59/60) + .35*.8 + .15/sqrt(2) + .15/3
        assert!((find(&result, "A").score - 0.7802).abs() < 1e-9);
        // B: .35*(32/30) + .35*.6 + .15/sqrt(5)
        assert!((find(&result, "B").score - 0.6504).abs() < 1e-9);
        // C: .35*.4 + .15
        assert!((find(&result, "C").score - 0.29).abs() < 1e-9);

        let titles: Vec<&str> = result.tasks.iter().map(|t| t.task.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_sample_reasons() {
        let result = scorer().score(&sample(), "smart_balance", None);

        assert_eq!(find(&result, "A").reason, "Blocks 1 task(s); High importance");
        assert_eq!(find(&result, "B").reason, REASON_PAST_DUE);
        assert_eq!(find(&result, "C").reason, REASON_QUICK_WIN);
    }

    #[test]
    fn test_overdue_outranks_under_deadline_driven() {
        let mut tasks = sample();
        tasks[1].due_date = Some(DueDate::Date(today() - Duration::days(10)));
        let result = scorer().score(&tasks, "deadline_driven", None);
        assert_eq!(result.tasks[0].task.title, "B");
    }

    #[test]
    fn test_all_reasons_in_order() {
        let facts = TaskFacts {
            position: 0,
            due: Some(today() - Duration::days(1)),
            hours: 0.5,
            importance: 9,
            blocking: 2,
        };
        assert_eq!(
            build_reason(&facts, today()),
            "Past due — needs immediate attention; Blocks 2 task(s); \
             Quick win (low effort); High importance"
        );
    }

    #[test]
    fn test_balanced_reason() {
        let facts = TaskFacts {
            position: 0,
            due: Some(today()),
            hours: 3.0,
            importance: 5,
            blocking: 0,
        };
        assert_eq!(build_reason(&facts, today()), REASON_BALANCED);
    }

    #[test]
    fn test_due_dates_normalized() {
        let tasks = vec![
            Task::new("parsed").with_due_text("2025-06-20"),
            Task::new("garbage").with_due_text("someday"),
        ];
        let result = scorer().score(&tasks, "smart_balance", None);

        let parsed = find(&result, "parsed");
        assert_eq!(
            parsed.task.due_date,
            Some(DueDate::Date(NaiveDate::from_ymd_opt(2025, 6, 20).unwrap()))
        );
        assert_eq!(find(&result, "garbage").task.due_date, None);
    }

    #[test]
    fn test_cycle_reported() {
        let tasks = vec![
            Task::new("A").with_id("a").with_dependencies(["b"]),
            Task::new("B").with_id("b").with_dependencies(["a"]),
        ];
        let result = scorer().score(&tasks, "smart_balance", None);
        assert!(result.meta.cycle_detected);
        assert_eq!(result.tasks.len(), 2);
    }

    #[test]
    fn test_deterministic() {
        let s = scorer();
        let first = s.score(&sample(), "high_impact", None);
        let second = s.score(&sample(), "high_impact", None);
        assert_eq!(first, second);
    }

    #[test]
    fn test_ties_preserve_input_order() {
        let tasks: Vec<Task> = (0..6).map(|i| Task::new(format!("t{i}"))).collect();
        let result = scorer().score(&tasks, "fastest_wins", None);
        let titles: Vec<String> = result.tasks.iter().map(|t| t.task.title.clone()).collect();
        assert_eq!(titles, vec!["t0", "t1", "t2", "t3", "t4", "t5"]);
    }

    #[test]
    fn test_unknown_strategy_matches_default() {
        let s = scorer();
        assert_eq!(
            s.score(&sample(), "no_such_strategy", None),
            s.score(&sample(), "smart_balance", None)
        );
    }

    #[test]
    fn test_explicit_weights_under_unknown_name() {
        let effort_only = Weights::new(0.0, 0.0, 1.0, 0.0);
        let result = scorer().score(&sample(), "custom", Some(&effort_only));
        assert_eq!(result.tasks[0].task.title, "C");
        assert!((result.tasks[0].score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_unnormalized_weights_used_as_given() {
        let doubled = Weights::new(0.0, 0.0, 2.0, 0.0);
        let tasks = vec![Task::new("half hour").with_hours(0.5)];
        let result = scorer().score(&tasks, "custom", Some(&doubled));
        assert_eq!(result.tasks[0].score, 2.0);
    }

    #[test]
    fn test_negative_weights_fall_back() {
        let negative = Weights::new(-1.0, 0.0, 2.0, 0.0);
        let result = scorer().score(&sample(), "custom", Some(&negative));
        assert_eq!(result, scorer().score(&sample(), "smart_balance", None));
    }

    #[test]
    fn test_explicit_precedence_config() {
        let effort_only = Weights::new(0.0, 0.0, 1.0, 0.0);
        let s = TaskScorer::new(
            ScorerConfig::default()
                .with_today(today())
                .with_precedence(WeightPrecedence::Explicit),
        )
        .unwrap();
        let result = s.score(&sample(), Profile::HighImpact.name(), Some(&effort_only));
        assert_eq!(result.tasks[0].task.title, "C");
    }

    #[test]
    fn test_scores_non_negative() {
        let tasks = vec![
            Task::new("extreme").with_hours(1e9).with_importance(-50),
            Task::new("far").with_due_date(today() + Duration::days(9000)),
        ];
        for s in Profile::ALL {
            let result = scorer().score(&tasks, s.name(), None);
            assert!(result.tasks.iter().all(|t| t.score >= 0.0));
        }
    }

    #[test]
    fn test_suggest_top_three() {
        let mut tasks = sample();
        tasks.push(Task::new("D").with_id("4"));
        let set = scorer().suggest(&tasks, "smart_balance", None);

        // batch of four: A's dependency pressure is 1/4
        assert_eq!(set.suggestions.len(), 3);
        assert_eq!(
            set.suggestions[0].explanation,
            "Selected because: Blocks 1 task(s); High importance, score 0.7677"
        );
        let ranked = scorer().score(&tasks, "smart_balance", None);
        for (suggestion, scored) in set.suggestions.iter().zip(&ranked.tasks) {
            assert_eq!(&suggestion.task, scored);
        }
    }

    #[test]
    fn test_explain_whole_score() {
        let effort_only = Weights::new(0.0, 0.0, 1.0, 0.0);
        let set = scorer().suggest(&sample(), "custom", Some(&effort_only));
        assert_eq!(
            set.suggestions[0].explanation,
            "Selected because: Quick win (low effort), score 1.0"
        );
        assert_eq!(score_text(0.0), "0.0");
        assert_eq!(score_text(2.0), "2.0");
        assert_eq!(score_text(0.7802), "0.7802");
    }

    #[test]
    fn test_suggest_short_batch() {
        let set = scorer().suggest(&sample()[..1], "smart_balance", None);
        assert_eq!(set.suggestions.len(), 1);
    }

    #[test]
    fn test_score_batches() {
        let s = TaskScorer::new(
            ScorerConfig::default()
                .with_today(today())
                .with_parallel(true),
        )
        .unwrap();
        let batches = vec![sample(), Vec::new(), sample()[1..].to_vec()];
        let results = s.score_batches(&batches, "smart_balance", None);

        assert_eq!(results.len(), 3);
        assert_eq!(results[0], scorer().score(&batches[0], "smart_balance", None));
        assert!(results[1].tasks.is_empty());
        assert_eq!(results[2].tasks.len(), 2);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(TaskScorer::new(ScorerConfig::default().with_suggestion_limit(0)).is_err());
    }

    fn arb_task() -> impl Strategy<Value = Task> {
        (
            proptest::option::of(-90i64..120),
            proptest::option::of(-5.0f64..50.0),
            proptest::option::of(-3i64..15),
            proptest::collection::vec(0usize..12, 0..4),
        )
            .prop_map(|(due, hours, importance, deps)| Task {
                id: None,
                title: "t".into(),
                due_date: due.map(|d| DueDate::Date(today() + Duration::days(d))),
                estimated_hours: hours,
                importance,
                dependencies: deps.into_iter().map(|d| d.to_string()).collect(),
            })
    }

    proptest! {
        #[test]
        fn prop_ranking_well_formed(tasks in proptest::collection::vec(arb_task(), 0..12)) {
            for s in Profile::ALL {
                let result = scorer().score(&tasks, s.name(), None);
                prop_assert_eq!(result.tasks.len(), tasks.len());
                prop_assert!(result.tasks.iter().all(|t| t.score >= 0.0 && !t.reason.is_empty()));
                prop_assert!(result.tasks.windows(2).all(|w| w[0].score >= w[1].score));
            }
        }

        #[test]
        fn prop_unknown_strategy_is_smart_balance(tasks in proptest::collection::vec(arb_task(), 0..12)) {
            let s = scorer();
            prop_assert_eq!(s.score(&tasks, "bogus", None), s.score(&tasks, "smart_balance", None));
        }
    }
}
