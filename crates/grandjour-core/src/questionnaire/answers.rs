//! Answer sets collected from the day-of questionnaire.
//!
//! The answer set is an explicit, externally-supplied value: the engine
//! never reads ambient state. Answers arrive as a plain JSON object
//! (`{"coiffure": "coiffure simple", "heure_ceremonie": "15:00", ...}`)
//! and are matched to questions by option name.

use std::collections::HashMap;

use jiff::civil::Time;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};

/// One questionnaire answer.
///
/// The JSON representation is untagged: booleans, numbers, strings, and
/// string lists map directly. Times travel as "HH:MM" strings and are
/// parsed on demand by [`AnswerValue::as_time`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Number(i64),
    Text(String),
    List(Vec<String>),
}

impl AnswerValue {
    /// Canonical textual form used for option matching and conditions.
    pub fn as_text(&self) -> String {
        match self {
            AnswerValue::Bool(b) => b.to_string(),
            AnswerValue::Number(n) => n.to_string(),
            AnswerValue::Text(s) => s.clone(),
            AnswerValue::List(items) => items.join(","),
        }
    }

    /// Interpret the answer as a wall-clock time, if it is one.
    pub fn as_time(&self) -> Option<Time> {
        match self {
            AnswerValue::Text(s) => parse_clock(s).ok(),
            _ => None,
        }
    }

    /// Whether this answer declines the activity outright: `false`, the
    /// literal "non" (any casing), a non-positive number, or an empty
    /// selection. Checked before duration resolution; a declined answer
    /// produces no activity at all.
    pub fn declines_activity(&self) -> bool {
        match self {
            AnswerValue::Bool(b) => !b,
            AnswerValue::Number(n) => *n <= 0,
            AnswerValue::Text(s) => s.trim().eq_ignore_ascii_case("non"),
            AnswerValue::List(items) => items.is_empty(),
        }
    }
}

impl From<bool> for AnswerValue {
    fn from(value: bool) -> Self {
        AnswerValue::Bool(value)
    }
}

impl From<i64> for AnswerValue {
    fn from(value: i64) -> Self {
        AnswerValue::Number(value)
    }
}

impl From<&str> for AnswerValue {
    fn from(value: &str) -> Self {
        AnswerValue::Text(value.to_string())
    }
}

impl From<String> for AnswerValue {
    fn from(value: String) -> Self {
        AnswerValue::Text(value)
    }
}

/// The full set of questionnaire answers, keyed by option name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerSet(HashMap<String, AnswerValue>);

impl AnswerSet {
    /// Create an empty answer set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an answer, replacing any previous one for the same option.
    pub fn insert(&mut self, option_name: impl Into<String>, value: impl Into<AnswerValue>) {
        self.0.insert(option_name.into(), value.into());
    }

    /// Look up the answer for an option name.
    pub fn get(&self, option_name: &str) -> Option<&AnswerValue> {
        self.0.get(option_name)
    }

    /// Whether an option was answered affirmatively ("oui", "yes", or a
    /// boolean `true`).
    pub fn is_yes(&self, option_name: &str) -> bool {
        match self.0.get(option_name) {
            Some(AnswerValue::Bool(b)) => *b,
            Some(AnswerValue::Text(s)) => {
                let s = s.trim();
                s.eq_ignore_ascii_case("oui") || s.eq_ignore_ascii_case("yes")
            }
            _ => false,
        }
    }

    /// Number of recorded answers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the set holds no answers.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parse a "HH:MM" (or full "HH:MM:SS") wall-clock string.
///
/// # Errors
///
/// * `TimelineError::InvalidInput` - when the string is not a clock time
pub fn parse_clock(s: &str) -> Result<Time> {
    let trimmed = s.trim();
    trimmed
        .parse::<Time>()
        .or_else(|_| format!("{trimmed}:00").parse::<Time>())
        .map_err(|_| {
            TimelineError::invalid_input("time", format!("'{s}' is not a valid HH:MM time"))
        })
}
