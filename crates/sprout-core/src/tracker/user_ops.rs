//! Account administration for the JourneyTracker.

use super::JourneyTracker;
use crate::{
    backend::JourneyBackend,
    error::Result,
    models::{UserAccount, UserRole},
    params::{SetUserRole, UserId},
    session::SessionStore,
};

impl<B, S> JourneyTracker<B, S>
where
    B: JourneyBackend,
    S: SessionStore,
{
    /// Every account. Requires the admin role.
    pub async fn users(&self) -> Result<Vec<UserAccount>> {
        let token = self.token()?;
        self.backend.list_users(&token).await
    }

    /// Blocks or reactivates an account. Requires the admin role.
    ///
    /// A blocked account cannot sign in and its sessions stop working.
    pub async fn toggle_user_status(&self, params: &UserId) -> Result<UserAccount> {
        let token = self.token()?;
        self.backend
            .toggle_user_status(&token, params.user_id)
            .await
    }

    /// Grants or revokes the admin role. Requires the admin role.
    pub async fn set_user_role(&self, params: &SetUserRole) -> Result<UserAccount> {
        let token = self.token()?;
        let role = if params.admin {
            UserRole::Admin
        } else {
            UserRole::Farmer
        };
        self.backend
            .set_user_role(&token, params.user_id, role)
            .await
    }
}
