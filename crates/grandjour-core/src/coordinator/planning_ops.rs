//! Planning operations for the Coordinator.

use tokio::task;

use super::Coordinator;
use crate::{
    db::Database,
    display::PlanningSummaries,
    error::{Result, TimelineError},
    models::{Planning, PlanningStatus},
    params::{CreatePlanning, DeletePlanning, Id, ListPlannings},
};

impl Coordinator {
    /// Creates a new planning after validating the title and date.
    pub async fn create_planning(&self, params: &CreatePlanning) -> Result<Planning> {
        let wedding_date = params.validate()?;
        let db_path = self.db_path.clone();
        let title = params.title.trim().to_string();
        let notes = params.notes.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.create_planning(&title, wedding_date, notes.as_deref())
        })
        .await
        .map_err(|e| TimelineError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Lists planning summaries, either active or archived.
    pub async fn list_plannings_summary(
        &self,
        params: &ListPlannings,
    ) -> Result<PlanningSummaries> {
        let db_path = self.db_path.clone();
        let status = if params.archived {
            PlanningStatus::Archived
        } else {
            PlanningStatus::Active
        };

        let summaries = task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.list_planning_summaries(status)
        })
        .await
        .map_err(|e| TimelineError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(PlanningSummaries(summaries))
    }

    /// Retrieves a planning with its timeline activities.
    pub async fn show_planning_with_activities(&self, params: &Id) -> Result<Option<Planning>> {
        let db_path = self.db_path.clone();
        let planning_id = params.id;

        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            db.get_planning_with_activities(planning_id)
        })
        .await
        .map_err(|e| TimelineError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    /// Archives a planning, hiding it from the default list.
    pub async fn archive_planning(&self, params: &Id) -> Result<()> {
        self.set_status(params.id, PlanningStatus::Archived).await
    }

    /// Restores an archived planning to the active list.
    pub async fn unarchive_planning(&self, params: &Id) -> Result<()> {
        self.set_status(params.id, PlanningStatus::Active).await
    }

    /// Permanently deletes a planning and its activities. Requires the
    /// confirmation flag; returns the deleted planning for display.
    pub async fn delete_planning(&self, params: &DeletePlanning) -> Result<Planning> {
        if !params.confirmed {
            return Err(TimelineError::invalid_input(
                "confirmed",
                "Deletion requires explicit confirmation",
            ));
        }

        let db_path = self.db_path.clone();
        let planning_id = params.id;

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            let planning = db
                .get_planning(planning_id)?
                .ok_or(TimelineError::PlanningNotFound { id: planning_id })?;
            db.delete_planning(planning_id)?;
            Ok(planning)
        })
        .await
        .map_err(|e| TimelineError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }

    async fn set_status(&self, planning_id: u64, status: PlanningStatus) -> Result<()> {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            db.set_planning_status(planning_id, status)
        })
        .await
        .map_err(|e| TimelineError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
