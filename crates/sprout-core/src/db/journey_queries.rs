//! Active journey queries.

use std::collections::BTreeSet;

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::utils::{json_column, parsed_column};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{HistoryEntry, JourneyState, PostHarvest},
};

const SELECT_JOURNEY_SQL: &str = "SELECT crop_name, sowing_date, schedule, completed_tasks, post_harvest
     FROM journeys WHERE user_id = ?1";
const REPLACE_JOURNEY_SQL: &str = "INSERT OR REPLACE INTO journeys
     (user_id, crop_name, sowing_date, schedule, completed_tasks, post_harvest, started_at)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const UPDATE_COMPLETED_TASKS_SQL: &str = "UPDATE journeys SET completed_tasks = ?1 WHERE user_id = ?2";
const DELETE_JOURNEY_SQL: &str = "DELETE FROM journeys WHERE user_id = ?1";
const INSERT_HISTORY_SQL: &str = "INSERT INTO history
     (user_id, crop_name, start_date, completion_date, duration, status)
     VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

impl super::Database {
    /// Retrieves the active journey of a user.
    pub fn get_journey(&self, user_id: i64) -> Result<Option<JourneyState>> {
        self.connection
            .query_row(SELECT_JOURNEY_SQL, params![user_id], |row| {
                let post_harvest: Option<String> = row.get(4)?;
                let post_harvest = match post_harvest {
                    Some(_) => json_column::<PostHarvest>(row, 4)?,
                    None => PostHarvest::default(),
                };
                Ok(JourneyState {
                    crop_name: row.get(0)?,
                    sowing_date: parsed_column(row, 1)?,
                    schedule: json_column(row, 2)?,
                    completed_task_titles: json_column(row, 3)?,
                    post_harvest,
                })
            })
            .optional()
            .db_context("Failed to query journey")
    }

    /// Stores `journey` as the user's active journey, discarding any previous
    /// one without archiving it.
    pub fn replace_journey(&mut self, user_id: i64, journey: &JourneyState) -> Result<()> {
        self.connection
            .execute(
                REPLACE_JOURNEY_SQL,
                params![
                    user_id,
                    journey.crop_name,
                    journey.sowing_date.to_string(),
                    serde_json::to_string(&journey.schedule)?,
                    serde_json::to_string(&journey.completed_task_titles)?,
                    serde_json::to_string(&journey.post_harvest)?,
                    Timestamp::now().to_string(),
                ],
            )
            .db_context("Failed to save journey")?;
        Ok(())
    }

    /// Overwrites the completed task titles of the user's active journey.
    ///
    /// Returns false if the user has no active journey.
    pub fn set_completed_tasks(&mut self, user_id: i64, titles: &BTreeSet<String>) -> Result<bool> {
        let updated = self
            .connection
            .execute(
                UPDATE_COMPLETED_TASKS_SQL,
                params![serde_json::to_string(titles)?, user_id],
            )
            .db_context("Failed to update completed tasks")?;
        Ok(updated > 0)
    }

    /// Archives `entry` and clears the active journey in one transaction.
    pub fn archive_journey(&mut self, user_id: i64, entry: &HistoryEntry) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        tx.execute(
            INSERT_HISTORY_SQL,
            params![
                user_id,
                entry.crop_name,
                entry.start_date.to_string(),
                entry.completion_date.to_string(),
                entry.duration,
                entry.status.as_str(),
            ],
        )
        .db_context("Failed to insert history entry")?;

        tx.execute(DELETE_JOURNEY_SQL, params![user_id])
            .db_context("Failed to clear active journey")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(())
    }
}
