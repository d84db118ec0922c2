//! Read-side clustering of overlapping activities.
//!
//! Grouping is a pure presentation transform over a built timeline: it
//! never alters or persists activity timing. A set of 1-D intervals
//! overlaps pairwise exactly when `max(starts) < min(ends)`, so a single
//! pass over the start-sorted timeline suffices.

use jiff::civil::DateTime;

use super::Timeline;
use crate::models::Activity;

/// One display unit: either a single activity or a cluster of activities
/// whose time windows overlap pairwise.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallelGroup {
    /// Member activities in timeline order
    pub activities: Vec<Activity>,
    /// Earliest member start
    pub window_start: DateTime,
    /// Latest member end
    pub window_end: DateTime,
}

impl ParallelGroup {
    /// Whether this group renders side-by-side (more than one member).
    pub fn is_parallel(&self) -> bool {
        self.activities.len() > 1
    }
}

/// Cluster a timeline's activities into parallel groups.
///
/// Single-member groups render as normal items; multi-member groups render
/// side-by-side with the shared `[window_start, window_end)` label.
pub fn group_overlapping(timeline: &Timeline) -> Vec<ParallelGroup> {
    let mut groups: Vec<ParallelGroup> = Vec::new();
    // Smallest end among the members of the group under construction; a
    // candidate joins only while its start stays below it, which keeps the
    // overlap pairwise rather than merely chained.
    let mut group_min_end: Option<DateTime> = None;

    for activity in timeline {
        match (groups.last_mut(), group_min_end) {
            (Some(group), Some(min_end)) if activity.start_time < min_end => {
                group.window_end = group.window_end.max(activity.end_time);
                group.activities.push(activity.clone());
                group_min_end = Some(min_end.min(activity.end_time));
            }
            _ => {
                groups.push(ParallelGroup {
                    activities: vec![activity.clone()],
                    window_start: activity.start_time,
                    window_end: activity.end_time,
                });
                group_min_end = Some(activity.end_time);
            }
        }
    }

    groups
}
