//! Single-activity operations for the Coordinator.

use tokio::task;

use super::timeline_ops::{load_timeline, persist};
use super::{Coordinator, EditOutcome};
use crate::{
    db::Database,
    error::{Result, TimelineError},
    models::{Activity, ActivityDraft, ActivityPatch},
    params::{ActivityCreate, Id, UpdateActivity},
    schedule::{mutator, MIN_ACTIVITY_MINUTES},
};

impl Coordinator {
    /// Adds a manually created activity to a planning's timeline and
    /// recalculates. Returns the scheduled activity and the edit outcome.
    pub async fn add_activity(&self, params: &ActivityCreate) -> Result<(Activity, EditOutcome)> {
        let (category, fixed_time) = params.validate()?;
        let db_path = self.db_path.clone();
        let planning_id = params.planning_id;
        let title = params.title.trim().to_string();
        let duration = params.duration_minutes.max(MIN_ACTIVITY_MINUTES);
        let notes = params.notes.clone();
        let assigned_to = params.assigned_to.clone();
        let position = params.position;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let planning = db
                .get_planning(planning_id)?
                .ok_or(TimelineError::PlanningNotFound { id: planning_id })?;

            let mut draft = ActivityDraft::new(title, category, duration);
            draft.notes = notes;
            draft.assigned_to = assigned_to;
            if let Some(time) = fixed_time {
                draft.fixed_start = Some(planning.wedding_date.to_datetime(time));
            }

            let timeline = load_timeline(&db, planning_id)?;
            let seed_start = planning.wedding_date.to_datetime(jiff::civil::Time::midnight());
            let inserted = db.insert_activity(planning_id, &draft, seed_start)?;
            let activity_id = inserted.id;

            let timeline = mutator::insert(&timeline, inserted, position);
            let saved = persist(&mut db, planning_id, &timeline);

            let activity = timeline
                .iter()
                .find(|activity| activity.id == activity_id)
                .cloned()
                .ok_or(TimelineError::ActivityNotFound { id: activity_id })?;

            Ok((activity, EditOutcome { timeline, saved }))
        })
        .await
        .map_err(|e| TimelineError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Applies a field patch to one activity, recalculating from it
    /// forward when its duration changed.
    pub async fn update_activity(
        &self,
        params: &UpdateActivity,
    ) -> Result<(Activity, EditOutcome)> {
        let patch: ActivityPatch = params.clone().try_into()?;
        let db_path = self.db_path.clone();
        let activity_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let stored = db
                .get_activity(activity_id)?
                .ok_or(TimelineError::ActivityNotFound { id: activity_id })?;

            let timeline = load_timeline(&db, stored.planning_id)?;
            let timeline = mutator::update_fields(&timeline, activity_id, &patch)?;
            let saved = persist(&mut db, stored.planning_id, &timeline);

            let activity = timeline
                .iter()
                .find(|activity| activity.id == activity_id)
                .cloned()
                .ok_or(TimelineError::ActivityNotFound { id: activity_id })?;

            Ok((activity, EditOutcome { timeline, saved }))
        })
        .await
        .map_err(|e| TimelineError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Removes an activity from its timeline; later activities shift
    /// earlier to close the gap. Returns the removed activity for
    /// display.
    pub async fn remove_activity(&self, params: &Id) -> Result<(Activity, EditOutcome)> {
        let db_path = self.db_path.clone();
        let activity_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let stored = db
                .get_activity(activity_id)?
                .ok_or(TimelineError::ActivityNotFound { id: activity_id })?;

            let timeline = load_timeline(&db, stored.planning_id)?;
            let timeline = mutator::remove(&timeline, activity_id)?;
            db.delete_activity(activity_id)?;
            let saved = persist(&mut db, stored.planning_id, &timeline);

            Ok((stored, EditOutcome { timeline, saved }))
        })
        .await
        .map_err(|e| TimelineError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Retrieves a single activity by ID.
    pub async fn show_activity(&self, params: &Id) -> Result<Option<Activity>> {
        let db_path = self.db_path.clone();
        let activity_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_activity(activity_id)
        })
        .await
        .map_err(|e| TimelineError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
