//! Activity model definition and related functionality.

use jiff::civil::DateTime;
use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

use super::Category;

/// Represents one schedulable entry on a day-of timeline.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    /// Unique identifier for the activity
    pub id: u64,

    /// ID of the parent planning
    pub planning_id: u64,

    /// Display name of the activity
    pub title: String,

    /// Semantic category driving ordering and buffer policy
    pub category: Category,

    /// Scheduled wall-clock start
    pub start_time: DateTime,

    /// Scheduled wall-clock end; always `start_time + duration`
    pub end_time: DateTime,

    /// Duration in minutes
    pub duration_minutes: i64,

    /// Explicit user-pinned start time (typically on ceremonies). When
    /// set, the scheduler pins the activity here instead of chaining it
    /// after its predecessor.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_start: Option<DateTime>,

    /// Marks a key moment of the day (ceremonies always)
    pub is_highlight: bool,

    /// Optional free-text notes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// People or vendors responsible for this activity
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub assigned_to: Vec<String>,

    /// Order of the activity within its timeline (0-indexed)
    pub sort_order: u32,

    /// Timestamp when the activity was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the activity was last updated (UTC)
    pub updated_at: Timestamp,
}

impl Activity {
    /// Recompute `end_time` from `start_time` and `duration_minutes`.
    pub(crate) fn sync_end_time(&mut self) {
        self.end_time = add_minutes(self.start_time, self.duration_minutes);
    }
}

/// An activity not yet persisted: the output of questionnaire generation,
/// suggestion import, and manual creation, before the database assigns an
/// ID and the scheduler assigns times.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityDraft {
    pub title: String,
    pub category: Category,
    pub duration_minutes: i64,
    pub fixed_start: Option<DateTime>,
    pub is_highlight: bool,
    pub notes: Option<String>,
    pub assigned_to: Vec<String>,
}

impl ActivityDraft {
    /// Create a draft with the fields every creation path shares.
    pub fn new(title: impl Into<String>, category: Category, duration_minutes: i64) -> Self {
        Self {
            title: title.into(),
            category,
            duration_minutes,
            fixed_start: None,
            is_highlight: category.is_ceremony(),
            notes: None,
            assigned_to: Vec::new(),
        }
    }

    /// Pin the draft to an explicit wall-clock start.
    pub fn with_fixed_start(mut self, at: DateTime) -> Self {
        self.fixed_start = Some(at);
        self
    }
}

/// Shift a wall-clock datetime by whole minutes, saturating at the civil
/// datetime range bounds.
pub(crate) fn add_minutes(at: DateTime, minutes: i64) -> DateTime {
    at.saturating_add(SignedDuration::from_mins(minutes))
}
