//! Archived journey queries.

use rusqlite::params;

use super::utils::parsed_column;
use crate::{
    error::{DatabaseResultExt, Result},
    models::HistoryEntry,
};

const SELECT_HISTORY_SQL: &str = "SELECT crop_name, start_date, completion_date, duration, status
     FROM history WHERE user_id = ?1 ORDER BY completion_date DESC, id DESC";

impl super::Database {
    /// Lists a user's archived journeys, most recently completed first.
    pub fn list_history(&self, user_id: i64) -> Result<Vec<HistoryEntry>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_HISTORY_SQL)
            .db_context("Failed to prepare query")?;

        let entries = stmt
            .query_map(params![user_id], |row| {
                Ok(HistoryEntry {
                    crop_name: row.get(0)?,
                    start_date: parsed_column(row, 1)?,
                    completion_date: parsed_column(row, 2)?,
                    duration: row.get(3)?,
                    status: parsed_column(row, 4)?,
                })
            })
            .db_context("Failed to query history")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read history entry")?;

        Ok(entries)
    }
}
