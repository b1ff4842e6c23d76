//! Named weight profiles and weight resolution.

use crate::error::TaskRankError;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// Tolerance for the weights-sum-to-one check.
const SUM_TOLERANCE: f64 = 1e-6;

/// Weights of the four score components.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Weights {
    pub urgency: f64,
    pub importance: f64,
    pub effort: f64,
    pub dependency: f64,
}

impl Weights {
    pub const fn new(urgency: f64, importance: f64, effort: f64, dependency: f64) -> Self {
        Self {
            urgency,
            importance,
            effort,
            dependency,
        }
    }

    /// Sum of the four weights.
    pub fn sum(&self) -> f64 {
        self.urgency + self.importance + self.effort + self.dependency
    }

    /// Checks that every weight is finite and non-negative.
    ///
    /// This is all caller-supplied weights need; they may sum to anything.
    pub fn check_range(&self) -> Result<(), TaskRankError> {
        let named = [
            ("urgency", self.urgency),
            ("importance", self.importance),
            ("effort", self.effort),
            ("dependency", self.dependency),
        ];
        for (name, w) in named {
            if !w.is_finite() || w < 0.0 {
                return Err(TaskRankError::InvalidWeights(format!(
                    "{name} weight must be finite and non-negative, got {w}"
                )));
            }
        }
        Ok(())
    }

    /// Checks [`check_range`](Self::check_range) and that the weights sum
    /// to 1.0, as every named profile does.
    pub fn validate(&self) -> Result<(), TaskRankError> {
        self.check_range()?;
        let sum = self.sum();
        if (sum - 1.0).abs() > SUM_TOLERANCE {
            return Err(TaskRankError::InvalidWeights(format!(
                "weights must sum to 1.0, got {sum}"
            )));
        }
        Ok(())
    }
}

impl Default for Weights {
    fn default() -> Self {
        Strategy::SmartBalance.weights()
    }
}

/// A named weight profile.
///
/// | strategy | urgency | importance | effort | dependency |
/// |---|---|---|---|---|
/// | `smart_balance` | 0.35 | 0.35 | 0.15 | 0.15 |
/// | `fastest_wins` | 0.20 | 0.20 | 0.50 | 0.10 |
/// | `high_impact` | 0.15 | 0.60 | 0.10 | 0.15 |
/// | `deadline_driven` | 0.70 | 0.15 | 0.05 | 0.10 |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Strategy {
    /// Even split between urgency and importance.
    #[default]
    SmartBalance,

    /// Favour low-effort tasks.
    FastestWins,

    /// Favour important tasks.
    HighImpact,

    /// Favour tasks with near or missed deadlines.
    DeadlineDriven,
}

/// Profile table, indexed in [`Strategy::ALL`] order.
const PROFILES: [(Strategy, &str, Weights); 4] = [
    (
        Strategy::SmartBalance,
        "smart_balance",
        Weights::new(0.35, 0.35, 0.15, 0.15),
    ),
    (
        Strategy::FastestWins,
        "fastest_wins",
        Weights::new(0.20, 0.20, 0.50, 0.10),
    ),
    (
        Strategy::HighImpact,
        "high_impact",
        Weights::new(0.15, 0.60, 0.10, 0.15),
    ),
    (
        Strategy::DeadlineDriven,
        "deadline_driven",
        Weights::new(0.70, 0.15, 0.05, 0.10),
    ),
];

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::SmartBalance,
        Strategy::FastestWins,
        Strategy::HighImpact,
        Strategy::DeadlineDriven,
    ];

    fn slot(self) -> usize {
        match self {
            Strategy::SmartBalance => 0,
            Strategy::FastestWins => 1,
            Strategy::HighImpact => 2,
            Strategy::DeadlineDriven => 3,
        }
    }

    /// The selector name, e.g. `"smart_balance"`.
    pub fn name(self) -> &'static str {
        PROFILES[self.slot()].1
    }

    /// The profile's weights.
    pub fn weights(self) -> Weights {
        PROFILES[self.slot()].2
    }

    /// Looks a profile up by selector name. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        PROFILES
            .iter()
            .find(|(_, n, _)| *n == name)
            .map(|(s, _, _)| *s)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Which weights win when a caller supplies both a strategy name and
/// explicit weights.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WeightPrecedence {
    /// A recognized strategy name always uses its profile; explicit
    /// weights only apply under an unrecognized name.
    #[default]
    NamedProfile,

    /// Explicit weights always apply when given.
    Explicit,
}

/// Resolves the weights used for a scoring call.
///
/// Unrecognized names without explicit weights fall back to
/// `smart_balance`. Explicit weights are used as given, whatever their
/// sum; only weights failing [`Weights::check_range`] are ignored, so a
/// composite score can never go negative.
///
/// # Examples
///
/// ```
/// use u_taskrank::scoring::{resolve_weights, Strategy, WeightPrecedence, Weights};
///
/// let custom = Weights::new(0.25, 0.25, 0.25, 0.25);
///
/// // Named profile wins by default
/// let w = resolve_weights("high_impact", Some(&custom), WeightPrecedence::NamedProfile);
/// assert_eq!(w, Strategy::HighImpact.weights());
///
/// // Custom weights apply under an unrecognized name
/// let w = resolve_weights("mine", Some(&custom), WeightPrecedence::NamedProfile);
/// assert_eq!(w, custom);
/// ```
pub fn resolve_weights(
    strategy: &str,
    explicit: Option<&Weights>,
    precedence: WeightPrecedence,
) -> Weights {
    let named = Strategy::from_name(strategy);
    let explicit = explicit.copied().filter(|w| match w.check_range() {
        Ok(()) => true,
        Err(e) => {
            warn!(error = %e, "ignoring explicit weights");
            false
        }
    });

    let resolved = match (precedence, named, explicit) {
        (WeightPrecedence::NamedProfile, Some(s), _) => Some(s.weights()),
        (_, _, Some(w)) => Some(w),
        (WeightPrecedence::Explicit, Some(s), None) => Some(s.weights()),
        (_, None, None) => None,
    };

    resolved.unwrap_or_else(|| {
        warn!(strategy, "unrecognized strategy; using smart_balance");
        Strategy::SmartBalance.weights()
    })
}
