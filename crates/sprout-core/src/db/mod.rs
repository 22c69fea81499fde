//! Database operations and SQLite management for the local backend.
//!
//! This module handles the SQLite connection and schema, and provides query
//! interfaces for the crop library, users and sessions, journeys, archived
//! history and the client session cache.

use std::path::Path;

use rusqlite::Connection;

use crate::error::{DatabaseResultExt, Result};

pub mod crop_queries;
pub mod history_queries;
pub mod journey_queries;
pub mod migrations;
pub mod session_queries;
pub mod user_queries;
pub mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}
