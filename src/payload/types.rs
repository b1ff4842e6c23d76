//! Payload error types.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// One rejected field of a task payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Position of the task in the payload list; `None` for request-level
    /// fields such as `weights`.
    pub index: Option<usize>,

    /// Field name, or `"non_field"` when the entry itself is malformed.
    pub field: String,

    pub message: String,
}

impl FieldError {
    pub(crate) fn at(index: usize, field: &str, message: impl Into<String>) -> Self {
        Self {
            index: Some(index),
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub(crate) fn request(field: &str, message: impl Into<String>) -> Self {
        Self {
            index: None,
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(i) => write!(f, "tasks[{i}].{}: {}", self.field, self.message),
            None => write!(f, "{}: {}", self.field, self.message),
        }
    }
}

/// Reasons a raw payload cannot be turned into a task batch.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expecting a JSON list of tasks under root or in 'tasks' key")]
    NotAList,

    #[error("invalid task format: {}", join(.details))]
    InvalidTasks { details: Vec<FieldError> },

    #[error("duplicate task id {id:?} at positions {first} and {second}")]
    DuplicateId {
        id: String,
        first: usize,
        second: usize,
    },
}

fn join(details: &[FieldError]) -> String {
    details
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
