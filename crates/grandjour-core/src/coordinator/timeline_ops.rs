//! Timeline-level operations for the Coordinator.
//!
//! Generation, reordering, rebasing, and suggestion import. Each edit
//! recalculates in memory through the engine first and persists second;
//! a failed save is reported through [`EditOutcome::saved`], never by
//! rolling back.

use jiff::Zoned;
use log::warn;
use tokio::task;

use super::{Coordinator, EditOutcome};
use crate::{
    db::Database,
    error::{Result, TimelineError},
    params::{GenerateTimeline, Id, ImportSuggestions, MoveActivity, RebaseAnchor},
    questionnaire::{default_questionnaire, generate_drafts},
    schedule::{build_timeline, mutator, BuildOptions, Timeline},
    suggestions::merge_suggestions,
};

/// Load a planning's activities as a sorted timeline.
pub(super) fn load_timeline(db: &Database, planning_id: u64) -> Result<Timeline> {
    Ok(Timeline::from_activities(db.get_activities(planning_id)?))
}

/// Persist a recalculated timeline, reporting success instead of failing:
/// the in-memory timeline stays the source of truth for what the user
/// sees.
pub(super) fn persist(db: &mut Database, planning_id: u64, timeline: &Timeline) -> bool {
    match db.save_timeline(planning_id, timeline.activities()) {
        Ok(()) => true,
        Err(e) => {
            warn!("failed to persist timeline for planning {planning_id}: {e}");
            false
        }
    }
}

/// The anchor used when nothing on the timeline is pinned: the current
/// wall-clock time.
fn fallback_anchor() -> jiff::civil::DateTime {
    Zoned::now().datetime()
}

impl Coordinator {
    /// Loads the stored timeline for a planning.
    pub async fn timeline(&self, params: &Id) -> Result<Timeline> {
        let db_path = self.db_path.clone();
        let planning_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_planning(planning_id)?
                .ok_or(TimelineError::PlanningNotFound { id: planning_id })?;
            load_timeline(&db, planning_id)
        })
        .await
        .map_err(|e| TimelineError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Generates a timeline from questionnaire answers.
    ///
    /// Existing activities are replaced unless `keep_existing` is set, in
    /// which case the generated drafts join them in the rebuild.
    pub async fn generate_timeline(&self, params: &GenerateTimeline) -> Result<EditOutcome> {
        let db_path = self.db_path.clone();
        let planning_id = params.planning_id;
        let answers = params.answers.clone();
        let keep_existing = params.keep_existing;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let planning = db
                .get_planning(planning_id)?
                .ok_or(TimelineError::PlanningNotFound { id: planning_id })?;

            if !keep_existing {
                db.clear_activities(planning_id)?;
            }

            let drafts = generate_drafts(&default_questionnaire(), &answers, planning.wedding_date);
            let seed_start = planning.wedding_date.to_datetime(jiff::civil::Time::midnight());
            for draft in &drafts {
                db.insert_activity(planning_id, draft, seed_start)?;
            }

            let activities = db.get_activities(planning_id)?;
            let timeline = build_timeline(activities, &BuildOptions::new(fallback_anchor()));
            let saved = persist(&mut db, planning_id, &timeline);

            Ok(EditOutcome { timeline, saved })
        })
        .await
        .map_err(|e| TimelineError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Moves an activity to a new position (drag-drop reorder) and
    /// recalculates.
    pub async fn move_activity(&self, params: &MoveActivity) -> Result<EditOutcome> {
        let db_path = self.db_path.clone();
        let planning_id = params.planning_id;
        let (from, to) = (params.from, params.to);

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let timeline = load_timeline(&db, planning_id)?;
            let timeline = mutator::reorder(&timeline, from, to)?;
            let saved = persist(&mut db, planning_id, &timeline);
            Ok(EditOutcome { timeline, saved })
        })
        .await
        .map_err(|e| TimelineError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Slides the whole timeline so its anchor lands on the given time of
    /// the wedding day, preserving every relative offset.
    pub async fn rebase_timeline(&self, params: &RebaseAnchor) -> Result<EditOutcome> {
        let new_time = params.validate()?;
        let db_path = self.db_path.clone();
        let planning_id = params.planning_id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let planning = db
                .get_planning(planning_id)?
                .ok_or(TimelineError::PlanningNotFound { id: planning_id })?;

            let timeline = load_timeline(&db, planning_id)?;
            let new_anchor = planning.wedding_date.to_datetime(new_time);
            let timeline = mutator::rebase(&timeline, new_anchor);
            let saved = persist(&mut db, planning_id, &timeline);
            Ok(EditOutcome { timeline, saved })
        })
        .await
        .map_err(|e| TimelineError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Merges externally suggested tasks into the timeline.
    ///
    /// Malformed suggestions are dropped with a log line; the valid
    /// remainder joins the existing activities in a rebuild. Returns the
    /// number of merged suggestions along with the edit outcome.
    pub async fn import_suggestions(
        &self,
        params: &ImportSuggestions,
    ) -> Result<(usize, EditOutcome)> {
        let db_path = self.db_path.clone();
        let planning_id = params.planning_id;
        let suggestions = params.suggestions.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let planning = db
                .get_planning(planning_id)?
                .ok_or(TimelineError::PlanningNotFound { id: planning_id })?;

            let drafts = merge_suggestions(suggestions);
            let merged = drafts.len();
            let seed_start = planning.wedding_date.to_datetime(jiff::civil::Time::midnight());
            for draft in &drafts {
                db.insert_activity(planning_id, draft, seed_start)?;
            }

            let activities = db.get_activities(planning_id)?;
            let timeline = build_timeline(activities, &BuildOptions::new(fallback_anchor()));
            let saved = persist(&mut db, planning_id, &timeline);

            Ok((merged, EditOutcome { timeline, saved }))
        })
        .await
        .map_err(|e| TimelineError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Schedules a debounced save of an in-memory timeline, coalescing
    /// rapid successive edits into a single write. Last write wins.
    pub fn save_timeline_debounced(&self, planning_id: u64, timeline: Timeline) {
        let db_path = self.db_path.clone();
        self.debouncer.schedule(move || async move {
            let result = task::spawn_blocking(move || {
                let mut db = Database::new(&db_path)?;
                db.save_timeline(planning_id, timeline.activities())
            })
            .await;
            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => warn!("debounced save for planning {planning_id} failed: {e}"),
                Err(e) => warn!("debounced save for planning {planning_id} panicked: {e}"),
            }
        });
    }
}
