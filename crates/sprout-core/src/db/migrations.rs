//! Database schema initialization and crop library seeding.

use jiff::Timestamp;
use log::info;
use rusqlite::params;

use crate::{
    error::{DatabaseResultExt, Result},
    models::Crop,
};

/// `user_version` once the bundled crops have been loaded.
const SEEDED_VERSION: i64 = 1;

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        // Enable foreign keys for this connection
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.add_user_status_column()?;
        self.seed_crop_library()?;

        Ok(())
    }

    /// Adds `users.status` to databases created before accounts could be
    /// blocked.
    fn add_user_status_column(&self) -> Result<()> {
        let present: bool = self
            .connection
            .query_row(
                "SELECT COUNT(*) > 0 FROM pragma_table_info('users') WHERE name = 'status'",
                [],
                |row| row.get(0),
            )
            .db_context("Failed to inspect users table")?;
        if present {
            return Ok(());
        }

        self.connection
            .execute(
                "ALTER TABLE users ADD COLUMN status TEXT NOT NULL DEFAULT 'active' \
                 CHECK (status IN ('active', 'blocked'))",
                [],
            )
            .db_context("Failed to add users.status column")?;
        info!("Added account status column to users table");
        Ok(())
    }

    /// Loads the bundled crop library the first time a database is opened.
    ///
    /// Seeding is recorded in `user_version`, so a library emptied by an admin
    /// stays empty.
    fn seed_crop_library(&self) -> Result<()> {
        let version: i64 = self
            .connection
            .query_row("PRAGMA user_version", [], |row| row.get(0))
            .db_context("Failed to read schema version")?;
        if version >= SEEDED_VERSION {
            return Ok(());
        }

        let crops: Vec<Crop> = serde_json::from_str(include_str!("../../assets/crops.json"))?;
        let now = Timestamp::now().to_string();
        for crop in &crops {
            self.connection
                .execute(
                    "INSERT OR IGNORE INTO crops (name, data, updated_at) VALUES (?1, ?2, ?3)",
                    params![crop.name, serde_json::to_string(crop)?, now],
                )
                .db_context("Failed to seed crop library")?;
        }
        self.connection
            .execute_batch(&format!("PRAGMA user_version = {SEEDED_VERSION}"))
            .db_context("Failed to record schema version")?;
        info!("Seeded crop library with {} crops", crops.len());

        Ok(())
    }
}
