//! Initial timeline computation from a raw activity set.

use jiff::civil::DateTime;
use log::warn;

use super::{Timeline, PREP_WINDOW_MINUTES};
use crate::models::activity::add_minutes;
use crate::models::Activity;

/// Options controlling a timeline build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Anchor used when no activity carries an explicit pinned time.
    /// Callers typically pass the current wall-clock time.
    pub fallback_anchor: DateTime,

    /// Length of the preparation window scheduled ahead of the anchor.
    pub prep_window_minutes: i64,
}

impl BuildOptions {
    /// Create build options with the default preparation window.
    pub fn new(fallback_anchor: DateTime) -> Self {
        Self {
            fallback_anchor,
            prep_window_minutes: PREP_WINDOW_MINUTES,
        }
    }
}

/// Compute a complete, time-consistent timeline from a set of activities.
///
/// The relative order comes from the category precedence table (stable, so
/// activities of the same category keep their input order). The first
/// activity carrying an explicit `fixed_start` (typically the first
/// ceremony) anchors the absolute timing: everything before it is laid
/// out forward from `anchor - prep_window`, everything from it onward is
/// chained as `previous end + buffer(previous category)`. Pinned
/// activities always start at their pinned time, even when the
/// accumulated cursor has drifted past it; explicit user intent wins over
/// sequencing drift.
///
/// Without any pinned activity the fallback anchor is used and a warning
/// is logged; the build still succeeds with a best-effort schedule. An
/// empty input produces an empty timeline.
pub fn build_timeline(mut activities: Vec<Activity>, options: &BuildOptions) -> Timeline {
    if activities.is_empty() {
        return Timeline::default();
    }

    activities.sort_by_key(|activity| activity.category.precedence());

    let window_start = match activities.iter().find_map(|activity| activity.fixed_start) {
        Some(anchor) => add_minutes(anchor, -options.prep_window_minutes),
        None => {
            warn!(
                "no anchored activity in build input; falling back to {}",
                options.fallback_anchor
            );
            options.fallback_anchor
        }
    };

    let mut cursor = window_start;
    for activity in &mut activities {
        let start = match activity.fixed_start {
            Some(pinned) => {
                if pinned < cursor {
                    warn!(
                        "pinned start {} for '{}' is earlier than the accumulated cursor {}; \
                         preceding activities overrun into it",
                        pinned, activity.title, cursor
                    );
                }
                pinned
            }
            None => cursor,
        };
        activity.start_time = start;
        activity.sync_end_time();
        cursor = add_minutes(
            activity.end_time,
            activity.category.buffer_after_minutes(),
        );
    }

    Timeline::from_activities(activities)
}
