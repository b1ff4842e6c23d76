//! Raw JSON to task records.

use super::types::{FieldError, PayloadError};
use crate::scoring::Weights;
use crate::task::{DueDate, Task};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// A normalized scoring request.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreRequest {
    pub tasks: Vec<Task>,

    /// Explicit weights from a `weights` key, if the payload was an object.
    pub weights: Option<Weights>,
}

/// Parses a JSON payload into a task batch.
///
/// See [`normalize_request`] for the accepted shapes.
pub fn parse_batch(json: &str) -> Result<Vec<Task>, PayloadError> {
    parse_request(json).map(|req| req.tasks)
}

/// Parses a JSON payload into a [`ScoreRequest`].
pub fn parse_request(json: &str) -> Result<ScoreRequest, PayloadError> {
    let value: Value = serde_json::from_str(json)?;
    normalize_request(value)
}

/// Normalizes an already-decoded payload.
///
/// Accepts a list of task objects, or an object holding such a list under
/// `tasks` (and optionally `weights`). Field types are checked and coerced:
///
/// | field | accepted |
/// |---|---|
/// | `id` | string, integer, null |
/// | `title` | string (required) |
/// | `due_date` | string, null |
/// | `estimated_hours` | number, null |
/// | `importance` | number (truncated), null |
/// | `dependencies` | list of strings/integers, null |
///
/// Every problem in every entry is reported at once. Value ranges are not
/// checked here; the scorer clamps them. Unparseable due date text is kept
/// and treated as absent during scoring. A batch whose effective ids collide
/// is rejected.
pub fn normalize_request(value: Value) -> Result<ScoreRequest, PayloadError> {
    let mut details = Vec::new();
    let (items, weights) = match value {
        Value::Array(items) => (items, None),
        Value::Object(mut map) => {
            let items = match map.remove("tasks") {
                Some(Value::Array(items)) => items,
                _ => return Err(PayloadError::NotAList),
            };
            let weights = match map.remove("weights") {
                None | Some(Value::Null) => None,
                Some(raw) => match serde_json::from_value::<Weights>(raw) {
                    Ok(w) => match w.check_range() {
                        Ok(()) => Some(w),
                        Err(e) => {
                            details.push(FieldError::request("weights", e.to_string()));
                            None
                        }
                    },
                    Err(e) => {
                        details.push(FieldError::request("weights", e.to_string()));
                        None
                    }
                },
            };
            (items, weights)
        }
        _ => return Err(PayloadError::NotAList),
    };

    let mut tasks = Vec::with_capacity(items.len());
    for (index, item) in items.into_iter().enumerate() {
        if let Some(task) = normalize_task(index, item, &mut details) {
            tasks.push(task);
        }
    }

    if !details.is_empty() {
        return Err(PayloadError::InvalidTasks { details });
    }
    check_unique_ids(&tasks)?;

    Ok(ScoreRequest { tasks, weights })
}

fn normalize_task(index: usize, value: Value, details: &mut Vec<FieldError>) -> Option<Task> {
    let Value::Object(mut map) = value else {
        details.push(FieldError::at(index, "non_field", "expected an object"));
        return None;
    };
    let before = details.len();
    let mut task = Task::default();

    match take(&mut map, "id") {
        None => {}
        Some(v) => match id_text(&v) {
            Some(id) => task.id = Some(id),
            None => details.push(FieldError::at(index, "id", "must be a string or integer")),
        },
    }

    match map.remove("title") {
        Some(Value::String(title)) => task.title = title,
        Some(_) => details.push(FieldError::at(index, "title", "must be a string")),
        None => details.push(FieldError::at(index, "title", "this field is required")),
    }

    match take(&mut map, "due_date") {
        None => {}
        Some(Value::String(text)) => task.due_date = Some(DueDate::Text(text)),
        Some(_) => details.push(FieldError::at(index, "due_date", "must be a date string")),
    }

    match take(&mut map, "estimated_hours") {
        None => {}
        Some(v) => match v.as_f64() {
            Some(hours) => task.estimated_hours = Some(hours),
            None => details.push(FieldError::at(index, "estimated_hours", "must be a number")),
        },
    }

    match take(&mut map, "importance") {
        None => {}
        Some(v) => match integer(&v) {
            Some(importance) => task.importance = Some(importance),
            None => details.push(FieldError::at(index, "importance", "must be an integer")),
        },
    }

    match take(&mut map, "dependencies") {
        None => {}
        Some(Value::Array(deps)) => {
            for (k, dep) in deps.iter().enumerate() {
                match id_text(dep) {
                    Some(id) => task.dependencies.push(id),
                    None => details.push(FieldError::at(
                        index,
                        "dependencies",
                        format!("element {k} must be a string or integer"),
                    )),
                }
            }
        }
        Some(_) => details.push(FieldError::at(index, "dependencies", "must be a list")),
    }

    (details.len() == before).then_some(task)
}

/// Removes a key, treating an explicit `null` as absent.
fn take(map: &mut Map<String, Value>, key: &str) -> Option<Value> {
    map.remove(key).filter(|v| !v.is_null())
}

fn id_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
        _ => None,
    }
}

fn integer(value: &Value) -> Option<i64> {
    if let Some(i) = value.as_i64() {
        return Some(i);
    }
    value
        .as_f64()
        .filter(|f| f.is_finite())
        .map(|f| f.trunc().clamp(i64::MIN as f64, i64::MAX as f64) as i64)
}

fn check_unique_ids(tasks: &[Task]) -> Result<(), PayloadError> {
    let mut seen: HashMap<String, usize> = HashMap::with_capacity(tasks.len());
    for (i, task) in tasks.iter().enumerate() {
        let id = task.effective_id(i);
        if let Some(&first) = seen.get(&id) {
            return Err(PayloadError::DuplicateId {
                id,
                first,
                second: i,
            });
        }
        seen.insert(id, i);
    }
    Ok(())
}
