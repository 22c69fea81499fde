//! In-process backend over the local SQLite database.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use jiff::civil::Date;
use log::{debug, info};
use tokio::task;

use super::JourneyBackend;
use crate::{
    clock::Clock,
    db::{user_queries::UserRecord, Database},
    error::{JourneyError, Result},
    models::{
        ActiveStatus, AuthSession, Crop, HistoryEntry, JourneyState, Schedule, TaskCompletion,
        UserAccount, UserRole,
    },
    progress,
};

/// Backend that serves the journey API from a SQLite file.
///
/// Every call opens its own connection on a blocking worker thread.
#[derive(Clone)]
pub struct LocalBackend {
    db_path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl LocalBackend {
    pub fn new<P: AsRef<Path>>(db_path: P, clock: Arc<dyn Clock>) -> Self {
        Self {
            db_path: db_path.as_ref().to_path_buf(),
            clock,
        }
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `f` against a fresh connection on the blocking pool.
    async fn blocking<T, F>(&self, f: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let db = Database::new(&db_path)?;
            f(db)
        })
        .await
        .map_err(JourneyError::join)?
    }
}

fn authorize(db: &Database, token: &str) -> Result<UserRecord> {
    db.user_for_token(token)?.ok_or(JourneyError::Unauthorized)
}

fn authorize_admin(db: &Database, token: &str, operation: &str) -> Result<UserRecord> {
    let user = authorize(db, token)?;
    if user.profile.role != UserRole::Admin {
        return Err(JourneyError::Forbidden {
            operation: operation.to_string(),
        });
    }
    Ok(user)
}

/// Rejects changes an admin makes to their own account.
fn ensure_other_account(admin: &UserRecord, user_id: i64, field: &str) -> Result<()> {
    if admin.id == user_id {
        return Err(JourneyError::invalid_input(field)
            .with_reason("admins cannot change their own account"));
    }
    Ok(())
}

fn active_journey(db: &Database, user: &UserRecord) -> Result<JourneyState> {
    db.get_journey(user.id)?.ok_or(JourneyError::NoActiveJourney)
}

impl JourneyBackend for LocalBackend {
    async fn login(&self, name: &str, role: Option<UserRole>) -> Result<AuthSession> {
        let name = name.to_string();
        let session = self.blocking(move |mut db| db.login(&name, role)).await?;
        info!("Signed in '{}' as {}", session.user.name, session.user.role.as_str());
        Ok(session)
    }

    async fn logout(&self, token: &str) -> Result<()> {
        let token = token.to_string();
        let revoked = self.blocking(move |mut db| db.logout(&token)).await?;
        debug!("logout: token revoked = {revoked}");
        Ok(())
    }

    async fn active_status(&self, token: &str) -> Result<ActiveStatus> {
        let token = token.to_string();
        let today = self.clock.today();
        self.blocking(move |db| {
            let user = authorize(&db, &token)?;
            Ok(match db.get_journey(user.id)? {
                Some(journey) => ActiveStatus::from_journey(&journey, today),
                None => ActiveStatus::inactive(),
            })
        })
        .await
    }

    async fn start_followup(
        &self,
        token: &str,
        crop_name: &str,
        sowing_date: Date,
    ) -> Result<ActiveStatus> {
        let token = token.to_string();
        let crop_name = crop_name.to_string();
        let today = self.clock.today();

        self.blocking(move |mut db| {
            let user = authorize(&db, &token)?;
            let crop = db
                .get_crop(&crop_name)?
                .ok_or_else(|| JourneyError::CropNotFound {
                    name: crop_name.clone(),
                })?;

            // The routine is copied into the journey row so library edits
            // never reach an in-progress journey.
            let schedule = Schedule::new(crop.routine)?;
            let mut journey = JourneyState::start(crop.name, schedule, sowing_date);
            journey.post_harvest = crop.post_harvest.unwrap_or_default();

            db.replace_journey(user.id, &journey)?;
            info!(
                "Started {} journey for '{}' sown on {}",
                journey.crop_name, user.profile.name, journey.sowing_date
            );

            Ok(ActiveStatus::from_journey(&journey, today))
        })
        .await
    }

    async fn toggle_task(&self, token: &str, task_title: &str) -> Result<TaskCompletion> {
        let token = token.to_string();
        let task_title = task_title.to_string();

        self.blocking(move |mut db| {
            let user = authorize(&db, &token)?;
            let mut journey = active_journey(&db, &user)?;

            if !journey.schedule.iter().any(|phase| phase.title == task_title) {
                return Err(JourneyError::invalid_input("task_title").with_reason(format!(
                    "'{task_title}' is not a phase of the {} journey",
                    journey.crop_name
                )));
            }

            let done = journey.toggle_task(&task_title);
            db.set_completed_tasks(user.id, &journey.completed_task_titles)?;
            debug!("toggle_task: '{task_title}' done = {done}");

            Ok(TaskCompletion {
                completed_tasks: journey.completed_task_titles.into_iter().collect(),
            })
        })
        .await
    }

    async fn complete_journey(&self, token: &str) -> Result<HistoryEntry> {
        let token = token.to_string();
        let today = self.clock.today();

        self.blocking(move |mut db| {
            let user = authorize(&db, &token)?;
            let journey = active_journey(&db, &user)?;

            let days = journey.days_since_sowing(today);
            if !progress::is_harvest_complete(&journey.schedule, days) {
                return Err(JourneyError::invalid_state(format!(
                    "harvest of {} is not complete: day {days} of {}",
                    journey.crop_name,
                    journey.schedule.final_day()
                )));
            }

            let entry = HistoryEntry::completed(&journey, today);
            db.archive_journey(user.id, &entry)?;
            info!(
                "Archived {} journey for '{}' after {} days",
                entry.crop_name, user.profile.name, entry.duration
            );
            Ok(entry)
        })
        .await
    }

    async fn history(&self, token: &str) -> Result<Vec<HistoryEntry>> {
        let token = token.to_string();
        self.blocking(move |db| {
            let user = authorize(&db, &token)?;
            db.list_history(user.id)
        })
        .await
    }

    async fn crops(&self) -> Result<Vec<Crop>> {
        self.blocking(|db| db.list_crops()).await
    }

    async fn crop(&self, name: &str) -> Result<Option<Crop>> {
        let name = name.to_string();
        self.blocking(move |db| db.get_crop(&name)).await
    }

    async fn save_crop(&self, token: &str, crop: Crop) -> Result<()> {
        let token = token.to_string();
        self.blocking(move |mut db| {
            authorize_admin(&db, &token, "save_crop")?;
            if crop.name.trim().is_empty() {
                return Err(JourneyError::invalid_input("name").with_reason("must not be empty"));
            }
            db.upsert_crop(&crop)
        })
        .await
    }

    async fn delete_crop(&self, token: &str, name: &str) -> Result<bool> {
        let token = token.to_string();
        let name = name.to_string();
        self.blocking(move |mut db| {
            authorize_admin(&db, &token, "delete_crop")?;
            db.delete_crop(&name)
        })
        .await
    }

    async fn list_users(&self, token: &str) -> Result<Vec<UserAccount>> {
        let token = token.to_string();
        self.blocking(move |db| {
            authorize_admin(&db, &token, "list_users")?;
            db.list_users()
        })
        .await
    }

    async fn toggle_user_status(&self, token: &str, user_id: i64) -> Result<UserAccount> {
        let token = token.to_string();
        self.blocking(move |mut db| {
            let admin = authorize_admin(&db, &token, "toggle_user_status")?;
            ensure_other_account(&admin, user_id, "user_id")?;
            let account = db
                .get_user(user_id)?
                .ok_or(JourneyError::UserNotFound { id: user_id })?;

            let account = db.set_user_status(user_id, account.status.toggled())?;
            info!(
                "'{}' set account '{}' to {}",
                admin.profile.name,
                account.name,
                account.status.as_str()
            );
            Ok(account)
        })
        .await
    }

    async fn set_user_role(
        &self,
        token: &str,
        user_id: i64,
        role: UserRole,
    ) -> Result<UserAccount> {
        let token = token.to_string();
        self.blocking(move |mut db| {
            let admin = authorize_admin(&db, &token, "set_user_role")?;
            ensure_other_account(&admin, user_id, "user_id")?;

            let account = db.set_user_role(user_id, role)?;
            info!(
                "'{}' set role of '{}' to {}",
                admin.profile.name,
                account.name,
                account.role.as_str()
            );
            Ok(account)
        })
        .await
    }
}
