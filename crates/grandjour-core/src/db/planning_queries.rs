//! Planning CRUD operations and queries.

use jiff::civil::Date;
use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use crate::{
    error::{Result, TimelineError},
    models::{Planning, PlanningStatus, PlanningSummary},
};

const INSERT_PLANNING_SQL: &str = "INSERT INTO plannings (title, wedding_date, status, notes, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const SELECT_PLANNING_BY_ID_SQL: &str = "SELECT id, title, wedding_date, status, notes, created_at, updated_at FROM plannings WHERE id = ?1";
const SELECT_PLANNING_SUMMARIES_SQL: &str = "SELECT p.id, p.title, p.wedding_date, p.status, p.notes, p.created_at, p.updated_at, \
     (SELECT COUNT(*) FROM activities a WHERE a.planning_id = p.id), \
     (SELECT COUNT(*) FROM activities a WHERE a.planning_id = p.id AND a.is_highlight = 1) \
     FROM plannings p WHERE p.status = ?1 ORDER BY p.wedding_date, p.id";
const UPDATE_PLANNING_STATUS_SQL: &str =
    "UPDATE plannings SET status = ?1, updated_at = ?2 WHERE id = ?3";
const DELETE_PLANNING_SQL: &str = "DELETE FROM plannings WHERE id = ?1";
pub(super) const UPDATE_PLANNING_TIMESTAMP_SQL: &str =
    "UPDATE plannings SET updated_at = ?1 WHERE id = ?2";

impl super::Database {
    /// Helper function to construct a Planning from a database row
    fn build_planning_from_row(row: &rusqlite::Row) -> rusqlite::Result<Planning> {
        let status_str: String = row.get(3)?;
        let status = status_str.parse::<PlanningStatus>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                Type::Text,
                format!("Invalid status: {status_str}").into(),
            )
        })?;

        Ok(Planning {
            id: row.get::<_, i64>(0)? as u64,
            title: row.get(1)?,
            wedding_date: row.get::<_, String>(2)?.parse::<Date>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(e))
            })?,
            status,
            notes: row.get(4)?,
            created_at: row.get::<_, String>(5)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
            })?,
            updated_at: row.get::<_, String>(6)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(6, Type::Text, Box::new(e))
            })?,
            activities: vec![],
        })
    }

    /// Creates a new planning.
    pub fn create_planning(
        &mut self,
        title: &str,
        wedding_date: Date,
        notes: Option<&str>,
    ) -> Result<Planning> {
        let now = Timestamp::now();
        let now_str = now.to_string();

        self.connection
            .execute(
                INSERT_PLANNING_SQL,
                params![
                    title,
                    wedding_date.to_string(),
                    PlanningStatus::Active.as_str(),
                    notes,
                    &now_str,
                    &now_str
                ],
            )
            .map_err(|e| TimelineError::database_error("Failed to insert planning", e))?;

        let id = self.connection.last_insert_rowid() as u64;

        Ok(Planning {
            id,
            title: title.into(),
            wedding_date,
            status: PlanningStatus::Active,
            notes: notes.map(String::from),
            created_at: now,
            updated_at: now,
            activities: vec![],
        })
    }

    /// Retrieves a planning by ID, without its activities.
    pub fn get_planning(&self, planning_id: u64) -> Result<Option<Planning>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLANNING_BY_ID_SQL)
            .map_err(|e| TimelineError::database_error("Failed to prepare query", e))?;

        let planning = stmt
            .query_row(params![planning_id as i64], Self::build_planning_from_row)
            .optional()
            .map_err(|e| TimelineError::database_error("Failed to get planning", e))?;

        Ok(planning)
    }

    /// Retrieves a planning by ID with its activities in timeline order.
    pub fn get_planning_with_activities(&self, planning_id: u64) -> Result<Option<Planning>> {
        let Some(mut planning) = self.get_planning(planning_id)? else {
            return Ok(None);
        };
        planning.activities = self.get_activities(planning_id)?;
        Ok(Some(planning))
    }

    /// Lists planning summaries for the given status, ordered by wedding
    /// date.
    pub fn list_planning_summaries(
        &self,
        status: PlanningStatus,
    ) -> Result<Vec<PlanningSummary>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLANNING_SUMMARIES_SQL)
            .map_err(|e| TimelineError::database_error("Failed to prepare query", e))?;

        let summaries = stmt
            .query_map(params![status.as_str()], |row| {
                let planning = Self::build_planning_from_row(row)?;
                let total: i64 = row.get(7)?;
                let highlights: i64 = row.get(8)?;
                Ok(PlanningSummary::from_planning(
                    planning,
                    total as u32,
                    highlights as u32,
                ))
            })
            .map_err(|e| TimelineError::database_error("Failed to query plannings", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TimelineError::database_error("Failed to fetch plannings", e))?;

        Ok(summaries)
    }

    /// Sets a planning's status (archive/unarchive).
    pub fn set_planning_status(&mut self, planning_id: u64, status: PlanningStatus) -> Result<()> {
        let now_str = Timestamp::now().to_string();
        let updated = self
            .connection
            .execute(
                UPDATE_PLANNING_STATUS_SQL,
                params![status.as_str(), &now_str, planning_id as i64],
            )
            .map_err(|e| TimelineError::database_error("Failed to update planning status", e))?;

        if updated == 0 {
            return Err(TimelineError::PlanningNotFound { id: planning_id });
        }

        Ok(())
    }

    /// Permanently deletes a planning and, via the cascade, its
    /// activities.
    pub fn delete_planning(&mut self, planning_id: u64) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_PLANNING_SQL, params![planning_id as i64])
            .map_err(|e| TimelineError::database_error("Failed to delete planning", e))?;

        if deleted == 0 {
            return Err(TimelineError::PlanningNotFound { id: planning_id });
        }

        Ok(())
    }
}
