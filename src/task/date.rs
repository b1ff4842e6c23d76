//! Due date representation and ISO-8601 parsing.

use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A due date as supplied by the caller.
///
/// Callers may hand over an already-parsed calendar date or raw ISO-8601
/// text. Text is resolved lazily by [`DueDate::resolve`]; text that does
/// not parse resolves to `None` rather than failing.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(untagged))]
pub enum DueDate {
    /// A calendar date.
    Date(NaiveDate),

    /// Unparsed text, expected to be `YYYY-MM-DD` (or basic `YYYYMMDD`).
    Text(String),
}

impl DueDate {
    /// Returns the calendar date, parsing text if necessary.
    pub fn resolve(&self) -> Option<NaiveDate> {
        match self {
            DueDate::Date(date) => Some(*date),
            DueDate::Text(text) => parse_iso_date(text),
        }
    }
}

impl From<NaiveDate> for DueDate {
    fn from(date: NaiveDate) -> Self {
        DueDate::Date(date)
    }
}

/// Parses an ISO-8601 calendar date in extended (`2025-03-14`) or basic
/// (`20250314`) form.
///
/// # Examples
///
/// ```
/// use u_taskrank::task::parse_iso_date;
///
/// assert!(parse_iso_date("2025-03-14").is_some());
/// assert!(parse_iso_date("20250314").is_some());
/// assert!(parse_iso_date("next tuesday").is_none());
/// ```
pub fn parse_iso_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(text, "%Y%m%d"))
        .ok()
}
