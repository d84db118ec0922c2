//! Planning model definition and related functionality.

use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Activity, PlanningStatus};

/// Represents one wedding's day-of coordination with metadata and its
/// timeline activities.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Planning {
    /// Unique identifier for the planning
    pub id: u64,

    /// Title of the planning, e.g. the couple's names
    pub title: String,

    /// Calendar day of the wedding
    pub wedding_date: Date,

    /// Status of the planning (active or archived)
    #[serde(default)]
    pub status: PlanningStatus,

    /// Optional free-text notes
    pub notes: Option<String>,

    /// Timestamp when the planning was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the planning was last modified (UTC)
    pub updated_at: Timestamp,

    /// Associated timeline activities (lazy-loaded by default)
    #[serde(default)]
    pub activities: Vec<Activity>,
}
