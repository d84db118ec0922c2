//! Collection wrapper types for displaying groups of domain objects.
//!
//! Newtype wrappers give collections a Display implementation with
//! graceful empty-collection handling, without bolting presentation onto
//! the domain types themselves.

use std::{fmt, ops::Index};

use super::datetime::ClockTime;
use crate::models::PlanningSummary;
use crate::schedule::{ParallelGroup, Timeline};

/// Newtype wrapper for displaying collections of planning summaries.
pub struct PlanningSummaries(pub Vec<PlanningSummary>);

impl PlanningSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of planning summaries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get a reference to the planning summary at the given index.
    pub fn get(&self, index: usize) -> Option<&PlanningSummary> {
        self.0.get(index)
    }

    /// Get an iterator over the planning summaries.
    pub fn iter(&self) -> std::slice::Iter<'_, PlanningSummary> {
        self.0.iter()
    }
}

impl Index<usize> for PlanningSummaries {
    type Output = PlanningSummary;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl IntoIterator for PlanningSummaries {
    type Item = PlanningSummary;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a PlanningSummaries {
    type Item = &'a PlanningSummary;
    type IntoIter = std::slice::Iter<'a, PlanningSummary>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for PlanningSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No plannings found.")
        } else {
            for planning in &self.0 {
                write!(f, "{}", planning)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying a timeline as a flat activity list.
pub struct TimelineView(pub Timeline);

impl fmt::Display for TimelineView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No activities on this timeline.")
        } else {
            for activity in &self.0 {
                write!(f, "{}", activity)?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper rendering a timeline with overlapping activities
/// clustered into parallel groups.
///
/// Single-member groups render as normal items; multi-member groups get a
/// shared time-range header and indented members.
pub struct GroupedTimeline(pub Vec<ParallelGroup>);

impl fmt::Display for GroupedTimeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No activities on this timeline.");
        }

        for group in &self.0 {
            if group.is_parallel() {
                writeln!(
                    f,
                    "### {}–{} In parallel",
                    ClockTime(&group.window_start),
                    ClockTime(&group.window_end)
                )?;
                writeln!(f)?;
                for activity in &group.activities {
                    writeln!(
                        f,
                        "- {}–{} {} ({})",
                        ClockTime(&activity.start_time),
                        ClockTime(&activity.end_time),
                        activity.title,
                        activity.category.label()
                    )?;
                }
                writeln!(f)?;
            } else {
                for activity in &group.activities {
                    write!(f, "{}", activity)?;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;
    use jiff::Timestamp;

    use super::*;
    use crate::models::{Activity, Category, PlanningStatus};
    use crate::schedule::group_overlapping;

    fn test_activity(id: u64, start_hour: i8, duration_minutes: i64) -> Activity {
        let start = date(2026, 6, 20).at(start_hour, 0, 0, 0);
        let mut activity = Activity {
            id,
            planning_id: 1,
            title: format!("Activity {id}"),
            category: Category::Custom,
            start_time: start,
            end_time: start,
            duration_minutes,
            fixed_start: None,
            is_highlight: false,
            notes: None,
            assigned_to: vec![],
            sort_order: 0,
            created_at: Timestamp::from_second(1_750_000_000).unwrap(),
            updated_at: Timestamp::from_second(1_750_000_000).unwrap(),
        };
        activity.sync_end_time();
        activity
    }

    fn test_summary() -> PlanningSummary {
        PlanningSummary {
            id: 1,
            title: "Nora & Sam".to_string(),
            wedding_date: date(2026, 6, 20),
            status: PlanningStatus::Active,
            notes: Some("garden venue".to_string()),
            created_at: Timestamp::from_second(1_750_000_000).unwrap(),
            updated_at: Timestamp::from_second(1_750_000_000).unwrap(),
            total_activities: 6,
            highlight_activities: 1,
        }
    }

    #[test]
    fn test_planning_summaries_display() {
        let summaries = PlanningSummaries(vec![test_summary()]);
        let output = format!("{}", summaries);
        assert!(output.contains("Nora & Sam"));
        assert!(output.contains("ID: 1"));
        assert!(output.contains("6 activities"));

        let empty = PlanningSummaries(vec![]);
        assert_eq!(format!("{}", empty), "No plannings found.\n");
    }

    #[test]
    fn test_timeline_view_display() {
        let timeline = Timeline::from_activities(vec![test_activity(1, 10, 30)]);
        let output = format!("{}", TimelineView(timeline));
        assert!(output.contains("10:00–10:30"));
        assert!(output.contains("Activity 1"));

        let empty = TimelineView(Timeline::default());
        assert_eq!(format!("{}", empty), "No activities on this timeline.\n");
    }

    #[test]
    fn test_grouped_timeline_display() {
        // Two overlapping activities and one disjoint.
        let mut a = test_activity(1, 10, 90);
        a.title = "Photos".to_string();
        let mut b = test_activity(2, 10, 60);
        b.title = "Cocktail setup".to_string();
        b.start_time = date(2026, 6, 20).at(10, 30, 0, 0);
        b.sync_end_time();
        let c = test_activity(3, 14, 30);

        let timeline = Timeline::from_activities(vec![a, b, c]);
        let groups = group_overlapping(&timeline);
        let output = format!("{}", GroupedTimeline(groups));

        assert!(output.contains("In parallel"));
        assert!(output.contains("10:00–11:30"));
        assert!(output.contains("- 10:30–11:30 Cocktail setup"));
        assert!(output.contains("Activity 3"));
    }
}
