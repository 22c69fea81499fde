//! User accounts and session tokens.

use std::sync::atomic::{AtomicU64, Ordering};

use jiff::Timestamp;
use log::warn;
use rusqlite::{params, OptionalExtension};

use super::utils::parsed_column;
use crate::{
    error::{DatabaseResultExt, JourneyError, Result},
    models::{AccountStatus, AuthSession, UserAccount, UserProfile, UserRole},
};

const SELECT_USER_BY_NAME_SQL: &str =
    "SELECT id, name, role, status FROM users WHERE name = ?1";
const SELECT_USER_BY_ID_SQL: &str = "SELECT id, name, role, status FROM users WHERE id = ?1";
const SELECT_USERS_SQL: &str = "SELECT id, name, role, status FROM users ORDER BY name";
const COUNT_ADMINS_SQL: &str = "SELECT COUNT(*) FROM users WHERE role = 'admin'";
const INSERT_USER_SQL: &str = "INSERT INTO users (name, role, created_at) VALUES (?1, ?2, ?3)";
const UPDATE_USER_ROLE_SQL: &str = "UPDATE users SET role = ?1 WHERE id = ?2";
const UPDATE_USER_STATUS_SQL: &str = "UPDATE users SET status = ?1 WHERE id = ?2";
const INSERT_SESSION_SQL: &str = "INSERT INTO sessions (token, user_id, created_at) VALUES (?1, ?2, ?3)";
const SELECT_SESSION_USER_SQL: &str = "SELECT u.id, u.name, u.role FROM sessions s
     JOIN users u ON u.id = s.user_id WHERE s.token = ?1 AND u.status = 'active'";
const DELETE_SESSION_SQL: &str = "DELETE FROM sessions WHERE token = ?1";
const DELETE_USER_SESSIONS_SQL: &str = "DELETE FROM sessions WHERE user_id = ?1";

/// Distinguishes tokens issued within the same clock tick.
static TOKEN_SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// A user row: database id plus profile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: i64,
    pub profile: UserProfile,
}

fn user_account(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserAccount> {
    Ok(UserAccount {
        id: row.get(0)?,
        name: row.get(1)?,
        role: parsed_column::<UserRole>(row, 2)?,
        status: parsed_column::<AccountStatus>(row, 3)?,
    })
}

fn user_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<UserRecord> {
    Ok(UserRecord {
        id: row.get(0)?,
        profile: UserProfile {
            name: row.get(1)?,
            role: parsed_column::<UserRole>(row, 2)?,
        },
    })
}

impl super::Database {
    /// Signs `name` in, creating the account on first use.
    ///
    /// Sign-in never changes an existing account's role. A new account gets
    /// the admin role only when `role` asks for it and no admin exists yet;
    /// later admins are promoted with [`Self::set_user_role`].
    pub fn login(&mut self, name: &str, role: Option<UserRole>) -> Result<AuthSession> {
        let name = name.trim();
        if name.is_empty() {
            return Err(JourneyError::invalid_input("name").with_reason("must not be empty"));
        }

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;
        let now = Timestamp::now();

        let existing = tx
            .query_row(SELECT_USER_BY_NAME_SQL, params![name], user_account)
            .optional()
            .db_context("Failed to query user")?;

        let user = match existing {
            Some(account) => {
                if account.status == AccountStatus::Blocked {
                    return Err(JourneyError::AccountBlocked { name: account.name });
                }
                if role.is_some_and(|role| role != account.role) {
                    warn!(
                        "Ignoring requested role for existing account '{}'",
                        account.name
                    );
                }
                UserRecord {
                    id: account.id,
                    profile: UserProfile {
                        name: account.name,
                        role: account.role,
                    },
                }
            }
            None => {
                let mut role = role.unwrap_or_default();
                if role == UserRole::Admin {
                    let admins: i64 = tx
                        .query_row(COUNT_ADMINS_SQL, [], |row| row.get(0))
                        .db_context("Failed to count admins")?;
                    if admins > 0 {
                        warn!("Creating '{name}' as farmer: an admin account already exists");
                        role = UserRole::Farmer;
                    }
                }
                tx.execute(
                    INSERT_USER_SQL,
                    params![name, role.as_str(), now.to_string()],
                )
                .db_context("Failed to insert user")?;
                UserRecord {
                    id: tx.last_insert_rowid(),
                    profile: UserProfile {
                        name: name.to_string(),
                        role,
                    },
                }
            }
        };

        let token = format!(
            "{:x}-{:x}-{:x}",
            user.id,
            now.as_nanosecond(),
            TOKEN_SEQUENCE.fetch_add(1, Ordering::Relaxed)
        );
        tx.execute(INSERT_SESSION_SQL, params![token, user.id, now.to_string()])
            .db_context("Failed to insert session")?;

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(AuthSession {
            token,
            user: user.profile,
        })
    }

    /// Resolves a session token to its user. Sessions of blocked accounts
    /// resolve to `None`.
    pub fn user_for_token(&self, token: &str) -> Result<Option<UserRecord>> {
        self.connection
            .query_row(SELECT_SESSION_USER_SQL, params![token], user_record)
            .optional()
            .db_context("Failed to query session")
    }

    /// Revokes a session token. Returns false if it was unknown.
    pub fn logout(&mut self, token: &str) -> Result<bool> {
        let deleted = self
            .connection
            .execute(DELETE_SESSION_SQL, params![token])
            .db_context("Failed to delete session")?;
        Ok(deleted > 0)
    }

    /// All accounts, ordered by name.
    pub fn list_users(&self) -> Result<Vec<UserAccount>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_USERS_SQL)
            .db_context("Failed to prepare users query")?;
        let users = stmt
            .query_map([], user_account)
            .db_context("Failed to query users")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read users")?;
        Ok(users)
    }

    /// One account by id.
    pub fn get_user(&self, id: i64) -> Result<Option<UserAccount>> {
        self.connection
            .query_row(SELECT_USER_BY_ID_SQL, params![id], user_account)
            .optional()
            .db_context("Failed to query user")
    }

    /// Sets an account's status. Blocking an account revokes its sessions.
    pub fn set_user_status(&mut self, id: i64, status: AccountStatus) -> Result<UserAccount> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let updated = tx
            .execute(UPDATE_USER_STATUS_SQL, params![status.as_str(), id])
            .db_context("Failed to update user status")?;
        if updated == 0 {
            return Err(JourneyError::UserNotFound { id });
        }
        if status == AccountStatus::Blocked {
            tx.execute(DELETE_USER_SESSIONS_SQL, params![id])
                .db_context("Failed to revoke user sessions")?;
        }
        let account = tx
            .query_row(SELECT_USER_BY_ID_SQL, params![id], user_account)
            .db_context("Failed to query user")?;

        tx.commit().db_context("Failed to commit transaction")?;
        Ok(account)
    }

    /// Sets an account's role.
    pub fn set_user_role(&mut self, id: i64, role: UserRole) -> Result<UserAccount> {
        let updated = self
            .connection
            .execute(UPDATE_USER_ROLE_SQL, params![role.as_str(), id])
            .db_context("Failed to update user role")?;
        if updated == 0 {
            return Err(JourneyError::UserNotFound { id });
        }
        self.get_user(id)?.ok_or(JourneyError::UserNotFound { id })
    }
}
