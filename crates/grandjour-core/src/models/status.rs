//! Status enumeration for plannings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of planning statuses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanningStatus {
    /// Planning is active and visible
    #[default]
    Active,

    /// Planning is archived and hidden from normal views
    Archived,
}

impl FromStr for PlanningStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "active" => Ok(PlanningStatus::Active),
            "archived" => Ok(PlanningStatus::Archived),
            _ => Err(format!("Invalid planning status: {s}")),
        }
    }
}

impl PlanningStatus {
    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanningStatus::Active => "active",
            PlanningStatus::Archived => "archived",
        }
    }
}
