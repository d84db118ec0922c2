//! Parameter structures for coordinator operations.
//!
//! Shared parameter structs usable across interfaces (CLI today, others
//! later) without framework-specific derives. Interface layers wrap these
//! with their own derive-heavy types and convert via `From`/`Into`; the
//! structures here keep only serde so they can travel as JSON.
//!
//! Calendar dates, clock times, and categories arrive as strings and are
//! validated by the `validate` methods below before any mutation happens,
//! so an invalid input never reaches the engine or the database.

use jiff::civil::{Date, Time};
use serde::{Deserialize, Serialize};

use crate::error::{Result, TimelineError};
use crate::models::Category;
use crate::questionnaire::{parse_clock, AnswerSet};
use crate::suggestions::RawSuggestion;

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters for creating a new planning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePlanning {
    /// Title of the planning, e.g. the couple's names (required)
    pub title: String,
    /// Calendar day of the wedding as "YYYY-MM-DD"
    pub wedding_date: String,
    /// Optional free-text notes
    pub notes: Option<String>,
}

impl CreatePlanning {
    /// Validate the parameters and return the parsed wedding date.
    ///
    /// # Errors
    ///
    /// * `TimelineError::InvalidInput` - empty title or unparseable date
    pub fn validate(&self) -> Result<Date> {
        if self.title.trim().is_empty() {
            return Err(TimelineError::invalid_input(
                "title",
                "Title must not be empty",
            ));
        }
        self.wedding_date.trim().parse::<Date>().map_err(|_| {
            TimelineError::invalid_input(
                "wedding_date",
                format!("'{}' is not a valid YYYY-MM-DD date", self.wedding_date),
            )
        })
    }
}

/// Parameters for listing plannings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListPlannings {
    /// Whether to show archived plannings instead of active ones
    #[serde(default)]
    pub archived: bool,
}

/// Parameters for permanently deleting a planning.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeletePlanning {
    /// The planning to delete
    pub id: u64,
    /// Deletion must be explicitly confirmed
    #[serde(default)]
    pub confirmed: bool,
}

/// Parameters for creating an activity by hand.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityCreate {
    /// ID of the planning to add the activity to
    pub planning_id: u64,
    /// Title of the activity (required)
    pub title: String,
    /// Category name (defaults to "custom" when empty)
    #[serde(default)]
    pub category: String,
    /// Duration in minutes
    pub duration_minutes: i64,
    /// Optional pinned start as "HH:MM"
    pub fixed_start: Option<String>,
    /// Optional free-text notes
    pub notes: Option<String>,
    /// People or vendors responsible
    #[serde(default)]
    pub assigned_to: Vec<String>,
    /// Optional 0-indexed position hint on the timeline
    pub position: Option<usize>,
}

impl ActivityCreate {
    /// Validate the parameters and return the parsed category and pinned
    /// time.
    ///
    /// # Errors
    ///
    /// * `TimelineError::InvalidInput` - empty title, unknown category, or
    ///   unparseable time
    pub fn validate(&self) -> Result<(Category, Option<Time>)> {
        if self.title.trim().is_empty() {
            return Err(TimelineError::invalid_input(
                "title",
                "Title must not be empty",
            ));
        }

        let category = if self.category.trim().is_empty() {
            Category::Custom
        } else {
            self.category
                .trim()
                .parse::<Category>()
                .map_err(|reason| TimelineError::invalid_input("category", reason))?
        };

        let fixed_start = match &self.fixed_start {
            Some(raw) => Some(parse_clock(raw)?),
            None => None,
        };

        Ok((category, fixed_start))
    }
}

/// Parameters for updating an existing activity.
///
/// All fields are optional; only provided ones change. Durations below
/// the 5-minute floor are clamped up, not rejected.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateActivity {
    /// Activity ID to update (required)
    pub id: u64,
    /// Updated title
    pub title: Option<String>,
    /// Updated duration in minutes
    pub duration_minutes: Option<i64>,
    /// Updated free-text notes
    pub notes: Option<String>,
    /// Updated assignment list
    pub assigned_to: Option<Vec<String>>,
    /// Updated key-moment flag
    pub is_highlight: Option<bool>,
}

/// Parameters for moving an activity to a new timeline position.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MoveActivity {
    /// The planning whose timeline is edited
    pub planning_id: u64,
    /// Current 0-indexed position
    pub from: usize,
    /// Target 0-indexed position
    pub to: usize,
}

/// Parameters for generating a timeline from questionnaire answers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateTimeline {
    /// The planning to generate for
    pub planning_id: u64,
    /// The questionnaire answers
    pub answers: AnswerSet,
    /// Keep already-present activities instead of replacing them
    #[serde(default)]
    pub keep_existing: bool,
}

/// Parameters for sliding a whole timeline to a new anchor time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RebaseAnchor {
    /// The planning whose timeline is rebased
    pub planning_id: u64,
    /// New anchor wall-clock time as "HH:MM"
    pub new_anchor: String,
}

impl RebaseAnchor {
    /// Validate the parameters and return the parsed anchor time.
    ///
    /// # Errors
    ///
    /// * `TimelineError::InvalidInput` - unparseable time
    pub fn validate(&self) -> Result<Time> {
        parse_clock(&self.new_anchor)
    }
}

/// Parameters for merging externally suggested tasks.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportSuggestions {
    /// The planning to merge into
    pub planning_id: u64,
    /// Raw suggestions from the external collaborator
    pub suggestions: Vec<RawSuggestion>,
}
