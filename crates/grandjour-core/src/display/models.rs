//! Display implementations for domain models.
//!
//! All Display trait implementations for the core domain models live
//! here, separated from the model definitions. Output is markdown for
//! rich terminal display: a planning renders as a header plus metadata
//! and its timeline; an activity renders as one timeline line with its
//! time window, title, and optional detail lines.

use std::fmt;

use super::datetime::{ClockTime, LocalDateTime};
use crate::models::{Activity, Planning, PlanningStatus, PlanningSummary};

impl fmt::Display for PlanningStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Planning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        // Metadata section
        writeln!(f, "- Date: {}", self.wedding_date)?;
        writeln!(f, "- Status: {}", self.status.as_str())?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        // Notes as a paragraph
        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }

        if !self.activities.is_empty() {
            writeln!(f, "\n## Timeline")?;
            writeln!(f)?;
            for activity in &self.activities {
                write!(f, "{}", activity)?;
            }
        } else {
            writeln!(f, "\nNo activities in this planning yet.")?;
        }

        Ok(())
    }
}

impl Activity {
    /// The star marker shown in front of key moments.
    fn highlight_marker(&self) -> &'static str {
        if self.is_highlight {
            "★ "
        } else {
            ""
        }
    }
}

impl fmt::Display for Activity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "### {}–{} {}{} ({}, {} min, ID {})",
            ClockTime(&self.start_time),
            ClockTime(&self.end_time),
            self.highlight_marker(),
            self.title,
            self.category.label(),
            self.duration_minutes,
            self.id
        )?;

        if let Some(notes) = &self.notes {
            writeln!(f)?;
            writeln!(f, "{notes}")?;
        }

        if !self.assigned_to.is_empty() {
            writeln!(f)?;
            writeln!(f, "- Assigned: {}", self.assigned_to.join(", "))?;
        }

        writeln!(f)?;
        Ok(())
    }
}

impl fmt::Display for PlanningSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts = if self.total_activities > 0 {
            format!(
                " ({} activities, {} highlights)",
                self.total_activities, self.highlight_activities
            )
        } else {
            String::new()
        };

        writeln!(f, "## {} (ID: {}){counts}", self.title, self.id)?;
        writeln!(f)?;

        writeln!(f, "- **Date**: {}", self.wedding_date)?;
        if let Some(notes) = &self.notes {
            writeln!(f, "- **Notes**: {notes}")?;
        }
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)?;

        Ok(())
    }
}
