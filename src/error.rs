//! Error types.
//!
//! Scoring itself never fails: malformed field values are clamped or
//! defaulted. Errors only come from explicit configuration validation and
//! from the payload layer that turns raw JSON into task records.

use thiserror::Error;

/// Errors reported by configuration validation and payload parsing.
#[derive(Debug, Error)]
pub enum TaskRankError {
    /// A weight quadruple is not usable (negative, non-finite, or not
    /// summing to 1.0).
    #[error("invalid weights: {0}")]
    InvalidWeights(String),

    /// A scorer configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The task payload could not be normalized.
    #[cfg(feature = "serde")]
    #[error(transparent)]
    Payload(#[from] crate::payload::PayloadError),
}
