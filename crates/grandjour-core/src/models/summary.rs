//! Planning summary types and functionality.

use jiff::civil::Date;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Planning, PlanningStatus};

/// Summary information about a planning with timeline statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanningSummary {
    /// Planning ID
    pub id: u64,
    /// Title of the planning
    pub title: String,
    /// Calendar day of the wedding
    pub wedding_date: Date,
    /// Planning status
    pub status: PlanningStatus,
    /// Optional free-text notes
    pub notes: Option<String>,
    /// Creation timestamp
    pub created_at: Timestamp,
    /// Last update timestamp
    pub updated_at: Timestamp,
    /// Total number of timeline activities
    pub total_activities: u32,
    /// Number of key-moment activities
    pub highlight_activities: u32,
}

impl PlanningSummary {
    /// Create a summary from a planning and precomputed activity counts.
    pub fn from_planning(planning: Planning, total: u32, highlights: u32) -> Self {
        Self {
            id: planning.id,
            title: planning.title,
            wedding_date: planning.wedding_date,
            status: planning.status,
            notes: planning.notes,
            created_at: planning.created_at,
            updated_at: planning.updated_at,
            total_activities: total,
            highlight_activities: highlights,
        }
    }
}

impl From<&Planning> for PlanningSummary {
    fn from(planning: &Planning) -> Self {
        let total = planning.activities.len() as u32;
        let highlights = planning
            .activities
            .iter()
            .filter(|activity| activity.is_highlight)
            .count() as u32;

        Self {
            id: planning.id,
            title: planning.title.clone(),
            wedding_date: planning.wedding_date,
            status: planning.status,
            notes: planning.notes.clone(),
            created_at: planning.created_at,
            updated_at: planning.updated_at,
            total_activities: total,
            highlight_activities: highlights,
        }
    }
}
