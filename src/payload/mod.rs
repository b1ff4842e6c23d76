//! JSON payload normalization and rendering.
//!
//! The scorer itself never rejects input. This layer sits in front of it
//! for callers holding raw JSON: it checks the payload shape and field
//! types, reports every problem as a structured [`FieldError`], and
//! renders results back to JSON in the `{"tasks", "meta"}` and
//! `{"suggestions", "meta"}` shapes.

mod normalize;
mod types;

pub use normalize::{normalize_request, parse_batch, parse_request, ScoreRequest};
pub use types::{FieldError, PayloadError};

use crate::error::TaskRankError;
use crate::scoring::TaskScorer;
use tracing::debug;

/// Parses `json`, scores it and renders the ranked result as JSON.
///
/// # Examples
///
/// ```
/// use u_taskrank::payload::analyze_json;
/// use u_taskrank::scoring::TaskScorer;
///
/// let json = r#"[{"title": "Ship it", "estimated_hours": 3, "importance": 9}]"#;
/// let out = analyze_json(json, "smart_balance", &TaskScorer::default()).unwrap();
/// let value: serde_json::Value = serde_json::from_str(&out).unwrap();
/// assert_eq!(value["tasks"][0]["reason"], "High importance");
/// assert_eq!(value["meta"]["cycle_detected"], false);
/// ```
pub fn analyze_json(
    json: &str,
    strategy: &str,
    scorer: &TaskScorer,
) -> Result<String, TaskRankError> {
    let request = parse_request(json).inspect_err(|e| debug!(error = %e, "rejected payload"))?;
    let result = scorer.score(&request.tasks, strategy, request.weights.as_ref());
    Ok(serde_json::to_string(&result).map_err(PayloadError::from)?)
}

/// Parses `json`, scores it and renders the top suggestions as JSON.
pub fn suggest_json(
    json: &str,
    strategy: &str,
    scorer: &TaskScorer,
) -> Result<String, TaskRankError> {
    let request = parse_request(json).inspect_err(|e| debug!(error = %e, "rejected payload"))?;
    let set = scorer.suggest(&request.tasks, strategy, request.weights.as_ref());
    Ok(serde_json::to_string(&set).map_err(PayloadError::from)?)
}
