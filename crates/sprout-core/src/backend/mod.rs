//! Contract of the journey backend.
//!
//! The tracker never touches persistence directly; everything it knows about a
//! user's journey comes from a [`JourneyBackend`]. Each method corresponds to
//! one call of the agronomy API:
//!
//! | Method             | Call                          |
//! |--------------------|-------------------------------|
//! | `active_status`    | `GET /user/active-status`     |
//! | `start_followup`   | `POST /user/start-followup`   |
//! | `toggle_task`      | `POST /user/toggle-task`      |
//! | `complete_journey` | `POST /user/complete-journey` |
//! | `history`          | `GET /user/history`           |
//! | `crops`            | `GET /crops`                  |
//! | `list_users`       | `GET /admin/users`            |
//! | `toggle_user_status` | `POST /admin/users/{id}/toggle-status` |
//! | `set_user_role`    | `POST /admin/users/{id}/role` |
//!
//! [`LocalBackend`] serves the same contract from a SQLite file.

use std::future::Future;

use jiff::civil::Date;

use crate::{
    error::Result,
    models::{
        ActiveStatus, AuthSession, Crop, HistoryEntry, TaskCompletion, UserAccount, UserRole,
    },
};

pub mod local;

pub use local::LocalBackend;

/// Operations offered by the journey backend.
pub trait JourneyBackend: Send + Sync {
    /// Signs a user in and returns a bearer token.
    fn login(
        &self,
        name: &str,
        role: Option<UserRole>,
    ) -> impl Future<Output = Result<AuthSession>> + Send;

    /// Revokes a bearer token.
    fn logout(&self, token: &str) -> impl Future<Output = Result<()>> + Send;

    /// Current journey state of the token's user.
    fn active_status(&self, token: &str) -> impl Future<Output = Result<ActiveStatus>> + Send;

    /// Starts a journey for `crop_name`, replacing any active one.
    fn start_followup(
        &self,
        token: &str,
        crop_name: &str,
        sowing_date: Date,
    ) -> impl Future<Output = Result<ActiveStatus>> + Send;

    /// Flips completion of a phase task.
    fn toggle_task(
        &self,
        token: &str,
        task_title: &str,
    ) -> impl Future<Output = Result<TaskCompletion>> + Send;

    /// Archives the active journey once harvest is complete.
    fn complete_journey(&self, token: &str) -> impl Future<Output = Result<HistoryEntry>> + Send;

    /// Archived journeys of the token's user.
    fn history(&self, token: &str) -> impl Future<Output = Result<Vec<HistoryEntry>>> + Send;

    /// The crop library.
    fn crops(&self) -> impl Future<Output = Result<Vec<Crop>>> + Send;

    /// One crop by name.
    fn crop(&self, name: &str) -> impl Future<Output = Result<Option<Crop>>> + Send;

    /// Adds or replaces a library crop. Admin only.
    fn save_crop(&self, token: &str, crop: Crop) -> impl Future<Output = Result<()>> + Send;

    /// Removes a library crop. Admin only.
    fn delete_crop(&self, token: &str, name: &str) -> impl Future<Output = Result<bool>> + Send;

    /// All accounts. Admin only.
    fn list_users(&self, token: &str) -> impl Future<Output = Result<Vec<UserAccount>>> + Send;

    /// Blocks an active account or reactivates a blocked one. Admin only.
    fn toggle_user_status(
        &self,
        token: &str,
        user_id: i64,
    ) -> impl Future<Output = Result<UserAccount>> + Send;

    /// Grants or revokes the admin role. Admin only.
    fn set_user_role(
        &self,
        token: &str,
        user_id: i64,
        role: UserRole,
    ) -> impl Future<Output = Result<UserAccount>> + Send;
}
