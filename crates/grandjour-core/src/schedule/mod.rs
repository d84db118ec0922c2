//! The timeline scheduling engine.
//!
//! Everything in this module is pure and synchronous: deterministic
//! functions over in-memory activities, with no I/O and no ambient state.
//! The async [`Coordinator`](crate::coordinator::Coordinator) invokes the
//! engine for every edit path and persists the result afterwards.
//!
//! - [`builder`]: initial schedule computation from a raw activity set
//!   (category precedence, anchor resolution, forward pass)
//! - [`mutator`]: incremental edits over an existing timeline (reorder,
//!   insert, remove, field update, anchor rebase)
//! - [`grouping`]: read-side clustering of overlapping activities for
//!   side-by-side display

use jiff::civil::DateTime;
use serde::{Deserialize, Serialize};

use crate::models::Activity;

pub mod builder;
pub mod grouping;
pub mod mutator;

#[cfg(test)]
mod tests;

pub use builder::{build_timeline, BuildOptions};
pub use grouping::{group_overlapping, ParallelGroup};

/// Hard floor on activity durations applied to every edit, in minutes.
pub const MIN_ACTIVITY_MINUTES: i64 = 5;

/// Default length of the preparation window scheduled ahead of the
/// anchoring ceremony, in minutes.
pub const PREP_WINDOW_MINUTES: i64 = 180;

/// Whether the day has one ceremony or two.
///
/// Selected by the questionnaire's "double ceremony" answer. The mode
/// decides which questionnaire branch generates activities; the precedence
/// table itself is shared (see [`crate::models::Category::precedence`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScheduleMode {
    /// One ceremony anchors the day
    #[default]
    Single,
    /// Two ceremonies with a second preparation/travel block in between
    Dual,
}

/// The full ordered activity sequence for one planning.
///
/// Invariant: activities are sorted by `start_time` ascending (ties broken
/// by `sort_order`) after every build or mutation, and `sort_order`
/// matches the position in the sequence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Timeline(Vec<Activity>);

impl Timeline {
    /// Wrap a set of activities, restoring the ordering invariant.
    pub fn from_activities(mut activities: Vec<Activity>) -> Self {
        activities.sort_by_key(|activity| (activity.start_time, activity.sort_order));
        for (index, activity) in activities.iter_mut().enumerate() {
            activity.sort_order = index as u32;
        }
        Self(activities)
    }

    /// The activities in timeline order.
    pub fn activities(&self) -> &[Activity] {
        &self.0
    }

    /// Consume the timeline, yielding its activities in order.
    pub fn into_activities(self) -> Vec<Activity> {
        self.0
    }

    /// Number of activities on the timeline.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the timeline has no activities.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over the activities in timeline order.
    pub fn iter(&self) -> std::slice::Iter<'_, Activity> {
        self.0.iter()
    }

    /// The activity at the given position, if any.
    pub fn get(&self, index: usize) -> Option<&Activity> {
        self.0.get(index)
    }

    /// Position of the activity with the given ID, if present.
    pub fn position_of(&self, activity_id: u64) -> Option<usize> {
        self.0.iter().position(|activity| activity.id == activity_id)
    }

    /// The wall-clock start of the timeline (earliest activity start).
    pub fn day_start(&self) -> Option<DateTime> {
        self.0.first().map(|activity| activity.start_time)
    }

    /// The wall-clock end of the timeline (latest activity end).
    pub fn day_end(&self) -> Option<DateTime> {
        self.0.iter().map(|activity| activity.end_time).max()
    }

    /// The first explicitly pinned start on the timeline, if any.
    ///
    /// This is the anchor that [`mutator::rebase`] translates against,
    /// typically the first ceremony.
    pub fn anchor_time(&self) -> Option<DateTime> {
        self.0.iter().find_map(|activity| activity.fixed_start)
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Activity;
    type IntoIter = std::slice::Iter<'a, Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Timeline {
    type Item = Activity;
    type IntoIter = std::vec::IntoIter<Activity>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
