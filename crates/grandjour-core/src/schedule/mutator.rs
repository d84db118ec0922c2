//! Incremental edits over an existing timeline.
//!
//! Every edit path (drag-drop reorder, insertion, deletion, field update,
//! anchor rebase) funnels through this module, so the sequential
//! recalculation exists in exactly one place. Operations take the current
//! timeline by reference and return a new one; callers persist the result
//! separately.

use jiff::civil::DateTime;

use super::Timeline;
use crate::error::{Result, TimelineError};
use crate::models::activity::add_minutes;
use crate::models::{Activity, ActivityPatch};

/// Move the activity at `from` to position `to`, then recompute times.
///
/// Reordering never changes durations; pinned activities stay at their
/// pinned time, everything else is rechained sequentially from the
/// timeline's original day start.
///
/// # Errors
///
/// * `TimelineError::InvalidInput` - when either index is out of range
pub fn reorder(timeline: &Timeline, from: usize, to: usize) -> Result<Timeline> {
    let len = timeline.len();
    if from >= len {
        return Err(TimelineError::invalid_input(
            "from",
            format!("Position {from} is out of range. Timeline has {len} activities"),
        ));
    }
    if to >= len {
        return Err(TimelineError::invalid_input(
            "to",
            format!("Position {to} is out of range. Timeline has {len} activities"),
        ));
    }

    let origin = timeline.day_start().unwrap_or_default();
    let mut activities = timeline.activities().to_vec();
    let moved = activities.remove(from);
    activities.insert(to, moved);

    Ok(resequence(activities, origin))
}

/// Insert a new activity at the position hint (append when absent or past
/// the end), then recompute times.
pub fn insert(timeline: &Timeline, activity: Activity, position: Option<usize>) -> Timeline {
    let origin = timeline
        .day_start()
        .or(activity.fixed_start)
        .unwrap_or(activity.start_time);
    let mut activities = timeline.activities().to_vec();
    let at = position.unwrap_or(activities.len()).min(activities.len());
    activities.insert(at, activity);

    resequence(activities, origin)
}

/// Remove the activity with the given ID, then recompute times so later
/// activities shift earlier and the gap closes.
///
/// # Errors
///
/// * `TimelineError::ActivityNotFound` - when no activity has that ID
pub fn remove(timeline: &Timeline, activity_id: u64) -> Result<Timeline> {
    let index = timeline
        .position_of(activity_id)
        .ok_or(TimelineError::ActivityNotFound { id: activity_id })?;

    let origin = timeline.day_start().unwrap_or_default();
    let mut activities = timeline.activities().to_vec();
    activities.remove(index);

    Ok(resequence(activities, origin))
}

/// Apply a field patch to one activity.
///
/// Non-timing fields (title, notes, assignments, highlight flag) change in
/// place. A duration change recomputes times from the patched activity
/// forward only; earlier activities are untouched, which is equivalent to
/// a full recalculation for a sequential chain.
///
/// # Errors
///
/// * `TimelineError::ActivityNotFound` - when no activity has that ID
/// * `TimelineError::InvalidInput` - when the patch fails validation
pub fn update_fields(
    timeline: &Timeline,
    activity_id: u64,
    patch: &ActivityPatch,
) -> Result<Timeline> {
    let index = timeline
        .position_of(activity_id)
        .ok_or(TimelineError::ActivityNotFound { id: activity_id })?;
    let patch = patch.clone().validated()?;

    let mut activities = timeline.activities().to_vec();
    let activity = &mut activities[index];

    if let Some(title) = patch.title {
        activity.title = title;
    }
    if let Some(notes) = patch.notes {
        activity.notes = Some(notes);
    }
    if let Some(assigned_to) = patch.assigned_to {
        activity.assigned_to = assigned_to;
    }
    if let Some(is_highlight) = patch.is_highlight {
        activity.is_highlight = is_highlight;
    }

    match patch.duration_minutes {
        Some(duration) if duration != activity.duration_minutes => {
            activity.duration_minutes = duration;
            let cursor = activity.start_time;
            Ok(resequence_from(activities, index, cursor))
        }
        _ => Ok(Timeline::from_activities(activities)),
    }
}

/// Shift the whole timeline so its anchor lands on `new_anchor`.
///
/// A pure translation: every start, end, and pinned time moves by the same
/// `new_anchor - old_anchor` delta, preserving durations and all relative
/// offsets exactly. The old anchor is the first pinned time on the
/// timeline, or the day start when nothing is pinned.
pub fn rebase(timeline: &Timeline, new_anchor: DateTime) -> Timeline {
    let Some(old_anchor) = timeline.anchor_time().or_else(|| timeline.day_start()) else {
        return Timeline::default();
    };
    let delta = old_anchor.duration_until(new_anchor);

    let mut activities = timeline.activities().to_vec();
    for activity in &mut activities {
        activity.start_time = activity.start_time.saturating_add(delta);
        activity.end_time = activity.end_time.saturating_add(delta);
        activity.fixed_start = activity
            .fixed_start
            .map(|pinned| pinned.saturating_add(delta));
    }

    Timeline::from_activities(activities)
}

/// Rechain the full list sequentially from `origin`, honoring pins.
fn resequence(activities: Vec<Activity>, origin: DateTime) -> Timeline {
    resequence_from(activities, 0, origin)
}

/// Rechain activities from `index` onward, starting the cursor at
/// `cursor`. Entries before `index` keep their existing times.
fn resequence_from(mut activities: Vec<Activity>, index: usize, cursor: DateTime) -> Timeline {
    let mut cursor = cursor;
    for activity in activities.iter_mut().skip(index) {
        activity.start_time = activity.fixed_start.unwrap_or(cursor);
        activity.sync_end_time();
        cursor = add_minutes(
            activity.end_time,
            activity.category.buffer_after_minutes(),
        );
    }

    Timeline::from_activities(activities)
}
