//! Question definitions for the day-of questionnaire.

use serde::{Deserialize, Serialize};

use super::answers::AnswerSet;
use super::condition::Condition;
use crate::models::Category;

/// The answer shape a question expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// One choice among the declared options
    Choice,
    /// Any subset of the declared options
    MultiChoice,
    /// A wall-clock "HH:MM" answer that anchors the question's category
    TimeOfDay,
    /// A plain number (used for travel minutes)
    Number,
    /// Free text
    Text,
    /// No meaningful answer; the question contributes a fixed activity
    Fixed,
}

/// One selectable option of a choice question.
///
/// Options are explicitly tagged: either a plain value, or a value with
/// its own duration. Nothing is inferred from the shape at runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ChoiceOption {
    Plain(String),
    Timed { value: String, minutes: i64 },
}

impl ChoiceOption {
    /// Build a plain option.
    pub fn plain(value: impl Into<String>) -> Self {
        ChoiceOption::Plain(value.into())
    }

    /// Build an option carrying its own duration.
    pub fn timed(value: impl Into<String>, minutes: i64) -> Self {
        ChoiceOption::Timed {
            value: value.into(),
            minutes,
        }
    }

    /// The option's selectable value.
    pub fn value(&self) -> &str {
        match self {
            ChoiceOption::Plain(value) => value,
            ChoiceOption::Timed { value, .. } => value,
        }
    }

    /// The option's own duration, when it declares one.
    pub fn minutes(&self) -> Option<i64> {
        match self {
            ChoiceOption::Plain(_) => None,
            ChoiceOption::Timed { minutes, .. } => Some(*minutes),
        }
    }
}

/// One questionnaire question. When answered (and not declined), a
/// question produces at most one activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Category of the activity this question produces
    pub category: Category,
    /// Display label, also used as the produced activity's title
    pub label: String,
    /// Key into the answer set
    pub option_name: String,
    /// Expected answer shape
    pub kind: QuestionKind,
    /// Fixed duration in minutes, when the question declares one
    pub duration_minutes: Option<i64>,
    /// Declared options for choice questions
    #[serde(default)]
    pub options: Vec<ChoiceOption>,
    /// Visibility condition; absent means always visible
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible_if: Option<Condition>,
    /// Whether the question produces an activity at all. Control
    /// questions (like the dual-ceremony switch) and time anchors set
    /// this to false.
    pub produces_activity: bool,
}

impl Question {
    /// Create a question with the given identity; everything else via the
    /// chained builders below.
    pub fn new(
        category: Category,
        label: impl Into<String>,
        option_name: impl Into<String>,
        kind: QuestionKind,
    ) -> Self {
        let produces_activity = kind != QuestionKind::TimeOfDay;
        Self {
            category,
            label: label.into(),
            option_name: option_name.into(),
            kind,
            duration_minutes: None,
            options: Vec::new(),
            visible_if: None,
            produces_activity,
        }
    }

    /// Declare a fixed duration.
    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }

    /// Declare the selectable options.
    pub fn with_options(mut self, options: Vec<ChoiceOption>) -> Self {
        self.options = options;
        self
    }

    /// Restrict visibility to answer sets satisfying the condition.
    pub fn visible_if(mut self, condition: Condition) -> Self {
        self.visible_if = Some(condition);
        self
    }

    /// Mark as a control question that never produces an activity.
    pub fn control(mut self) -> Self {
        self.produces_activity = false;
        self
    }

    /// Whether the question is visible for the given answers.
    pub fn is_visible(&self, answers: &AnswerSet) -> bool {
        self.visible_if
            .as_ref()
            .map_or(true, |condition| condition.evaluate(answers))
    }
}
