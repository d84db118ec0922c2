//! Activity CRUD operations and timeline persistence.

use jiff::civil::DateTime;
use jiff::Timestamp;
use rusqlite::{params, types::Type, OptionalExtension};

use super::planning_queries::UPDATE_PLANNING_TIMESTAMP_SQL;
use crate::{
    error::{DatabaseResultExt, Result, TimelineError},
    models::activity::add_minutes,
    models::{Activity, ActivityDraft, Category},
};

const CHECK_PLANNING_EXISTS_SQL: &str = "SELECT EXISTS(SELECT 1 FROM plannings WHERE id = ?1)";
const GET_NEXT_SORT_ORDER_SQL: &str =
    "SELECT COALESCE(MAX(sort_order), -1) + 1 FROM activities WHERE planning_id = ?1";
const INSERT_ACTIVITY_SQL: &str = "INSERT INTO activities (planning_id, title, category, start_time, end_time, duration_minutes, fixed_start, is_highlight, notes, assigned_to, sort_order, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)";
const SELECT_ACTIVITIES_BY_PLANNING_SQL: &str = "SELECT id, planning_id, title, category, start_time, end_time, duration_minutes, fixed_start, is_highlight, notes, assigned_to, sort_order, created_at, updated_at FROM activities WHERE planning_id = ?1 ORDER BY sort_order";
const SELECT_ACTIVITY_BY_ID_SQL: &str = "SELECT id, planning_id, title, category, start_time, end_time, duration_minutes, fixed_start, is_highlight, notes, assigned_to, sort_order, created_at, updated_at FROM activities WHERE id = ?1";
const UPSERT_ACTIVITY_SQL: &str = "UPDATE activities SET title = ?1, category = ?2, start_time = ?3, end_time = ?4, duration_minutes = ?5, fixed_start = ?6, is_highlight = ?7, notes = ?8, assigned_to = ?9, sort_order = ?10, updated_at = ?11 WHERE id = ?12";
const DELETE_ACTIVITY_SQL: &str = "DELETE FROM activities WHERE id = ?1";
const DELETE_ACTIVITIES_BY_PLANNING_SQL: &str = "DELETE FROM activities WHERE planning_id = ?1";

impl super::Database {
    /// Helper function to construct an Activity from a database row
    fn build_activity_from_row(row: &rusqlite::Row) -> rusqlite::Result<Activity> {
        let category_str: String = row.get(3)?;
        let category = category_str.parse::<Category>().map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                3,
                Type::Text,
                format!("Invalid category: {category_str}").into(),
            )
        })?;

        let parse_datetime = |index: usize, value: String| {
            value.parse::<DateTime>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e))
            })
        };

        let fixed_start = row
            .get::<_, Option<String>>(7)?
            .map(|value| parse_datetime(7, value))
            .transpose()?;

        // Parse assignments from comma-separated string
        let assigned_str: Option<String> = row.get(10)?;
        let assigned_to = assigned_str
            .map(|s| s.split(',').map(String::from).collect())
            .unwrap_or_default();

        Ok(Activity {
            id: row.get::<_, i64>(0)? as u64,
            planning_id: row.get::<_, i64>(1)? as u64,
            title: row.get(2)?,
            category,
            start_time: parse_datetime(4, row.get::<_, String>(4)?)?,
            end_time: parse_datetime(5, row.get::<_, String>(5)?)?,
            duration_minutes: row.get(6)?,
            fixed_start,
            is_highlight: row.get::<_, i64>(8)? != 0,
            notes: row.get(9)?,
            assigned_to,
            sort_order: row.get::<_, i64>(11)? as u32,
            created_at: row.get::<_, String>(12)?.parse::<Timestamp>().map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(12, Type::Text, Box::new(e))
            })?,
            updated_at: row
                .get::<_, String>(13)?
                .parse::<Timestamp>()
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(13, Type::Text, Box::new(e))
                })?,
        })
    }

    /// Inserts a draft as a new activity row.
    ///
    /// `initial_start` seeds the stored times until the next scheduling
    /// pass overwrites them (a pinned draft starts at its pin).
    pub fn insert_activity(
        &mut self,
        planning_id: u64,
        draft: &ActivityDraft,
        initial_start: DateTime,
    ) -> Result<Activity> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        // Check if planning exists
        let planning_exists: bool = tx
            .query_row(CHECK_PLANNING_EXISTS_SQL, params![planning_id as i64], |row| {
                row.get(0)
            })
            .map_err(|e| TimelineError::database_error("Failed to check planning existence", e))?;

        if !planning_exists {
            return Err(TimelineError::PlanningNotFound { id: planning_id });
        }

        let next_order: i64 = tx
            .query_row(GET_NEXT_SORT_ORDER_SQL, params![planning_id as i64], |row| {
                row.get(0)
            })
            .map_err(|e| TimelineError::database_error("Failed to get next sort order", e))?;

        let start = draft.fixed_start.unwrap_or(initial_start);
        let end = add_minutes(start, draft.duration_minutes);
        let now = Timestamp::now();
        let now_str = now.to_string();

        // Store assignments as comma-separated string
        let assigned_str = if draft.assigned_to.is_empty() {
            None
        } else {
            Some(draft.assigned_to.join(","))
        };

        tx.execute(
            INSERT_ACTIVITY_SQL,
            params![
                planning_id as i64,
                &draft.title,
                draft.category.as_str(),
                start.to_string(),
                end.to_string(),
                draft.duration_minutes,
                draft.fixed_start.map(|dt| dt.to_string()),
                draft.is_highlight as i64,
                draft.notes.as_deref(),
                assigned_str.as_deref(),
                next_order,
                &now_str,
                &now_str
            ],
        )
        .map_err(|e| TimelineError::database_error("Failed to insert activity", e))?;

        let id = tx.last_insert_rowid() as u64;

        // Update planning's updated_at
        tx.execute(
            UPDATE_PLANNING_TIMESTAMP_SQL,
            params![&now_str, planning_id as i64],
        )
        .map_err(|e| TimelineError::database_error("Failed to update planning timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Activity {
            id,
            planning_id,
            title: draft.title.clone(),
            category: draft.category,
            start_time: start,
            end_time: end,
            duration_minutes: draft.duration_minutes,
            fixed_start: draft.fixed_start,
            is_highlight: draft.is_highlight,
            notes: draft.notes.clone(),
            assigned_to: draft.assigned_to.clone(),
            sort_order: next_order as u32,
            created_at: now,
            updated_at: now,
        })
    }

    /// Retrieves all activities for a planning in stored timeline order.
    pub fn get_activities(&self, planning_id: u64) -> Result<Vec<Activity>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ACTIVITIES_BY_PLANNING_SQL)
            .map_err(|e| TimelineError::database_error("Failed to prepare query", e))?;

        let activities = stmt
            .query_map(params![planning_id as i64], Self::build_activity_from_row)
            .map_err(|e| TimelineError::database_error("Failed to query activities", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TimelineError::database_error("Failed to fetch activities", e))?;

        Ok(activities)
    }

    /// Retrieves a single activity by its ID.
    pub fn get_activity(&self, activity_id: u64) -> Result<Option<Activity>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_ACTIVITY_BY_ID_SQL)
            .map_err(|e| TimelineError::database_error("Failed to prepare query", e))?;

        let activity = stmt
            .query_row(params![activity_id as i64], Self::build_activity_from_row)
            .optional()
            .map_err(|e| TimelineError::database_error("Failed to get activity", e))?;

        Ok(activity)
    }

    /// Persists a recalculated timeline: upserts every given activity in
    /// one transaction. Rows that vanished from the set are left alone;
    /// deletions go through [`Self::delete_activity`].
    pub fn save_timeline(&mut self, planning_id: u64, activities: &[Activity]) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now_str = Timestamp::now().to_string();

        for activity in activities {
            let assigned_str = if activity.assigned_to.is_empty() {
                None
            } else {
                Some(activity.assigned_to.join(","))
            };

            let updated = tx
                .execute(
                    UPSERT_ACTIVITY_SQL,
                    params![
                        &activity.title,
                        activity.category.as_str(),
                        activity.start_time.to_string(),
                        activity.end_time.to_string(),
                        activity.duration_minutes,
                        activity.fixed_start.map(|dt| dt.to_string()),
                        activity.is_highlight as i64,
                        activity.notes.as_deref(),
                        assigned_str.as_deref(),
                        activity.sort_order as i64,
                        &now_str,
                        activity.id as i64
                    ],
                )
                .map_err(|e| TimelineError::database_error("Failed to update activity", e))?;

            if updated == 0 {
                return Err(TimelineError::ActivityNotFound { id: activity.id });
            }
        }

        tx.execute(
            UPDATE_PLANNING_TIMESTAMP_SQL,
            params![&now_str, planning_id as i64],
        )
        .map_err(|e| TimelineError::database_error("Failed to update planning timestamp", e))?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(())
    }

    /// Removes a single activity.
    pub fn delete_activity(&mut self, activity_id: u64) -> Result<()> {
        let deleted = self
            .connection
            .execute(DELETE_ACTIVITY_SQL, params![activity_id as i64])
            .map_err(|e| TimelineError::database_error("Failed to delete activity", e))?;

        if deleted == 0 {
            return Err(TimelineError::ActivityNotFound { id: activity_id });
        }

        Ok(())
    }

    /// Removes every activity of a planning (used when regenerating a
    /// timeline from scratch).
    pub fn clear_activities(&mut self, planning_id: u64) -> Result<()> {
        self.connection
            .execute(
                DELETE_ACTIVITIES_BY_PLANNING_SQL,
                params![planning_id as i64],
            )
            .map_err(|e| TimelineError::database_error("Failed to clear activities", e))?;

        Ok(())
    }
}
