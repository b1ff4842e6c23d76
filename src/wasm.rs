//! WebAssembly bindings.
//!
//! Lets a browser front end rank tasks locally with the same scorer.
//! Inputs are task lists (or `{tasks, weights}` objects) as plain JS
//! values; outputs mirror the JSON shapes of the `payload` module.

use crate::payload::{normalize_request, ScoreRequest};
use crate::scoring::TaskScorer;
use wasm_bindgen::prelude::*;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn request(tasks: JsValue) -> Result<ScoreRequest, JsValue> {
    let value: serde_json::Value = serde_wasm_bindgen::from_value(tasks).map_err(to_js_error)?;
    normalize_request(value).map_err(to_js_error)
}

/// Scores a task list. Returns `{tasks, meta}`.
#[wasm_bindgen(js_name = analyzeTasks)]
pub fn analyze_tasks(tasks: JsValue, strategy: Option<String>) -> Result<JsValue, JsValue> {
    let req = request(tasks)?;
    let strategy = strategy.as_deref().unwrap_or("smart_balance");
    let result = TaskScorer::default().score(&req.tasks, strategy, req.weights.as_ref());
    serde_wasm_bindgen::to_value(&result).map_err(to_js_error)
}

/// Scores a task list and returns the top suggestions as
/// `{suggestions, meta}`.
#[wasm_bindgen(js_name = suggestTasks)]
pub fn suggest_tasks(tasks: JsValue, strategy: Option<String>) -> Result<JsValue, JsValue> {
    let req = request(tasks)?;
    let strategy = strategy.as_deref().unwrap_or("smart_balance");
    let set = TaskScorer::default().suggest(&req.tasks, strategy, req.weights.as_ref());
    serde_wasm_bindgen::to_value(&set).map_err(to_js_error)
}
