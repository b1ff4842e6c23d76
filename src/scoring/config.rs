//! Scorer configuration.

use super::strategy::WeightPrecedence;
use crate::error::TaskRankError;
use chrono::{Local, NaiveDate};

/// Configuration for [`TaskScorer`](super::TaskScorer).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use u_taskrank::scoring::{ScorerConfig, WeightPrecedence};
///
/// let config = ScorerConfig::default()
///     .with_today(NaiveDate::from_ymd_opt(2025, 1, 6).unwrap())
///     .with_precedence(WeightPrecedence::Explicit)
///     .with_suggestion_limit(5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ScorerConfig {
    /// Reference date for urgency and the past-due reason.
    ///
    /// `None` uses the local date at the time of each call.
    pub today: Option<NaiveDate>,

    /// How explicit weights interact with named strategies.
    pub precedence: WeightPrecedence,

    /// Whether to evaluate tasks (and batches) on the rayon pool.
    ///
    /// Has no effect unless the `parallel` feature is enabled. Results are
    /// identical either way.
    pub parallel: bool,

    /// Number of entries returned by [`TaskScorer::suggest`](super::TaskScorer::suggest).
    pub suggestion_limit: usize,
}

impl Default for ScorerConfig {
    fn default() -> Self {
        Self {
            today: None,
            precedence: WeightPrecedence::NamedProfile,
            parallel: false,
            suggestion_limit: 3,
        }
    }
}

impl ScorerConfig {
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn with_precedence(mut self, precedence: WeightPrecedence) -> Self {
        self.precedence = precedence;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_suggestion_limit(mut self, n: usize) -> Self {
        self.suggestion_limit = n;
        self
    }

    /// The date urgency is measured against.
    pub fn reference_date(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), TaskRankError> {
        if self.suggestion_limit == 0 {
            return Err(TaskRankError::InvalidConfig(
                "suggestion_limit must be positive".into(),
            ));
        }
        Ok(())
    }
}
