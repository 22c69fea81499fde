//! Key/value entries of the client session cache.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use crate::error::{DatabaseResultExt, Result};

const SELECT_ENTRY_SQL: &str = "SELECT value FROM session_entries WHERE key = ?1";
const UPSERT_ENTRY_SQL: &str = "INSERT INTO session_entries (key, value, updated_at) VALUES (?1, ?2, ?3)
     ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at";
const DELETE_ENTRY_SQL: &str = "DELETE FROM session_entries WHERE key = ?1";

impl super::Database {
    pub fn get_session_entry(&self, key: &str) -> Result<Option<String>> {
        self.connection
            .query_row(SELECT_ENTRY_SQL, params![key], |row| row.get(0))
            .optional()
            .db_context("Failed to query session entry")
    }

    pub fn set_session_entry(&self, key: &str, value: &str) -> Result<()> {
        self.connection
            .execute(
                UPSERT_ENTRY_SQL,
                params![key, value, Timestamp::now().to_string()],
            )
            .db_context("Failed to save session entry")?;
        Ok(())
    }

    pub fn delete_session_entry(&self, key: &str) -> Result<()> {
        self.connection
            .execute(DELETE_ENTRY_SQL, params![key])
            .db_context("Failed to delete session entry")?;
        Ok(())
    }
}
