//! Builder for creating and configuring tracker instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::task;

use super::{JourneyTracker, LocalTracker};
use crate::{
    backend::LocalBackend,
    clock::{Clock, SystemClock},
    db::Database,
    error::{JourneyError, Result},
    progress::DEFAULT_CYCLE_DAYS,
    session::SqliteSessionStore,
};

/// Builder for creating and configuring trackers over the local database.
#[derive(Clone)]
pub struct TrackerBuilder {
    database_path: Option<PathBuf>,
    clock: Arc<dyn Clock>,
    cycle_days: u32,
}

impl TrackerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            clock: Arc::new(SystemClock),
            cycle_days: DEFAULT_CYCLE_DAYS,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/sprout/sprout.db` or `~/.local/share/sprout/sprout.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Sets the clock that supplies today's date.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Sets the cycle length used for the headline percentage.
    pub fn with_cycle_days(mut self, cycle_days: u32) -> Self {
        self.cycle_days = cycle_days;
        self
    }

    /// Builds the configured tracker.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::InvalidInput` if the cycle length is zero
    /// Returns `JourneyError::FileSystem` if the database path is invalid
    /// Returns `JourneyError::Database` if database initialization fails
    pub async fn build(self) -> Result<LocalTracker> {
        if self.cycle_days == 0 {
            return Err(JourneyError::invalid_input("cycle_days").with_reason("must be at least 1"));
        }

        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| JourneyError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), JourneyError>(())
        })
        .await
        .map_err(JourneyError::join)??;

        Ok(JourneyTracker::new(
            LocalBackend::new(&db_path, self.clock.clone()),
            SqliteSessionStore::new(&db_path),
            self.clock,
            self.cycle_days,
        ))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("sprout")
            .place_data_file("sprout.db")
            .map_err(|e| JourneyError::XdgDirectory(e.to_string()))
    }
}

impl Default for TrackerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
