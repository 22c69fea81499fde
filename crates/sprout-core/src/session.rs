//! Persistent client-side session cache.
//!
//! Holds the bearer token, the cached user profile and the daily checklist.
//! Components receive a [`SessionStore`] instead of reading global state, so
//! tests can swap in [`MemorySessionStore`].

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::Mutex,
};

use log::warn;
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    db::Database,
    error::{JourneyError, Result},
};

/// Keys of the cached session entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionKey {
    Token,
    User,
    DailyTasks,
}

impl SessionKey {
    /// Storage key
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKey::Token => "sprout_token",
            SessionKey::User => "sprout_user",
            SessionKey::DailyTasks => "sprout_daily_tasks",
        }
    }
}

/// Key/value storage for session entries.
pub trait SessionStore: Send + Sync {
    /// Reads the raw value stored under `key`.
    fn load(&self, key: SessionKey) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn save(&self, key: SessionKey, value: &str) -> Result<()>;

    /// Removes the entry for `key`.
    fn clear(&self, key: SessionKey) -> Result<()>;

    /// Reads and decodes a JSON entry.
    ///
    /// Undecodable entries are treated as absent.
    fn load_json<T: DeserializeOwned>(&self, key: SessionKey) -> Result<Option<T>>
    where
        Self: Sized,
    {
        let Some(raw) = self.load(key)? else {
            return Ok(None);
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Ok(Some(value)),
            Err(e) => {
                warn!("Discarding unreadable session entry {}: {e}", key.as_str());
                Ok(None)
            }
        }
    }

    /// Encodes `value` as JSON and stores it.
    fn save_json<T: Serialize>(&self, key: SessionKey, value: &T) -> Result<()>
    where
        Self: Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.save(key, &raw)
    }
}

/// In-memory store, lost when dropped.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<SessionKey, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_entries<T>(&self, f: impl FnOnce(&mut HashMap<SessionKey, String>) -> T) -> Result<T> {
        let mut entries = self.entries.lock().map_err(|_| JourneyError::Configuration {
            message: "Session store lock poisoned".to_string(),
        })?;
        Ok(f(&mut entries))
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self, key: SessionKey) -> Result<Option<String>> {
        self.with_entries(|entries| entries.get(&key).cloned())
    }

    fn save(&self, key: SessionKey, value: &str) -> Result<()> {
        self.with_entries(|entries| {
            entries.insert(key, value.to_string());
        })
    }

    fn clear(&self, key: SessionKey) -> Result<()> {
        self.with_entries(|entries| {
            entries.remove(&key);
        })
    }
}

/// Store backed by the `session_entries` table of the local database.
#[derive(Debug, Clone)]
pub struct SqliteSessionStore {
    db_path: PathBuf,
}

impl SqliteSessionStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
        }
    }
}

impl SessionStore for SqliteSessionStore {
    fn load(&self, key: SessionKey) -> Result<Option<String>> {
        Database::new(&self.db_path)?.get_session_entry(key.as_str())
    }

    fn save(&self, key: SessionKey, value: &str) -> Result<()> {
        Database::new(&self.db_path)?.set_session_entry(key.as_str(), value)
    }

    fn clear(&self, key: SessionKey) -> Result<()> {
        Database::new(&self.db_path)?.delete_session_entry(key.as_str())
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::models::{UserProfile, UserRole};

    fn roundtrip(store: &impl SessionStore) {
        assert_eq!(store.load(SessionKey::Token).unwrap(), None);

        store.save(SessionKey::Token, "abc").unwrap();
        assert_eq!(store.load(SessionKey::Token).unwrap().as_deref(), Some("abc"));

        store.save(SessionKey::Token, "def").unwrap();
        assert_eq!(store.load(SessionKey::Token).unwrap().as_deref(), Some("def"));

        store.clear(SessionKey::Token).unwrap();
        assert_eq!(store.load(SessionKey::Token).unwrap(), None);
    }

    #[test]
    fn test_memory_store_load_save_clear() {
        roundtrip(&MemorySessionStore::new());
    }

    #[test]
    fn test_sqlite_store_load_save_clear() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        roundtrip(&SqliteSessionStore::new(temp_dir.path().join("session.db")));
    }

    #[test]
    fn test_json_entries() {
        let store = MemorySessionStore::new();
        let profile = UserProfile {
            name: "asha".to_string(),
            role: UserRole::Farmer,
        };

        store.save_json(SessionKey::User, &profile).unwrap();
        let loaded: Option<UserProfile> = store.load_json(SessionKey::User).unwrap();
        assert_eq!(loaded, Some(profile));
    }

    #[test]
    fn test_unreadable_json_is_treated_as_absent() {
        let store = MemorySessionStore::new();
        store.save(SessionKey::User, "{not json").unwrap();

        let loaded: Option<UserProfile> = store.load_json(SessionKey::User).unwrap();
        assert!(loaded.is_none());
    }
}
