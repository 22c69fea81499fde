//! Crop library queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension};

use super::utils::json_column;
use crate::{
    error::{DatabaseResultExt, Result},
    models::Crop,
};

const SELECT_CROPS_SQL: &str = "SELECT data FROM crops ORDER BY name COLLATE NOCASE";
const SELECT_CROP_SQL: &str = "SELECT data FROM crops WHERE name = ?1";
const UPSERT_CROP_SQL: &str = "INSERT INTO crops (name, data, updated_at) VALUES (?1, ?2, ?3)
     ON CONFLICT(name) DO UPDATE SET name = excluded.name, data = excluded.data, updated_at = excluded.updated_at";
const DELETE_CROP_SQL: &str = "DELETE FROM crops WHERE name = ?1";

impl super::Database {
    /// Lists every crop in the library, ordered by name.
    pub fn list_crops(&self) -> Result<Vec<Crop>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_CROPS_SQL)
            .db_context("Failed to prepare query")?;

        let crops = stmt
            .query_map([], |row| json_column::<Crop>(row, 0))
            .db_context("Failed to query crops")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read crop")?;

        Ok(crops)
    }

    /// Retrieves a crop by name, ignoring case.
    pub fn get_crop(&self, name: &str) -> Result<Option<Crop>> {
        self.connection
            .query_row(SELECT_CROP_SQL, params![name], |row| json_column::<Crop>(row, 0))
            .optional()
            .db_context("Failed to query crop")
    }

    /// Inserts a crop or replaces the library entry with the same name.
    pub fn upsert_crop(&mut self, crop: &Crop) -> Result<()> {
        let data = serde_json::to_string(crop)?;
        self.connection
            .execute(
                UPSERT_CROP_SQL,
                params![crop.name, data, Timestamp::now().to_string()],
            )
            .db_context("Failed to save crop")?;
        Ok(())
    }

    /// Removes a crop from the library. Returns false if it did not exist.
    pub fn delete_crop(&mut self, name: &str) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_CROP_SQL, params![name])
            .db_context("Failed to delete crop")?;
        Ok(deleted > 0)
    }
}
