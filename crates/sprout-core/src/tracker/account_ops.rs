//! Sign-in and sign-out for the JourneyTracker.

use log::{info, warn};

use super::JourneyTracker;
use crate::{
    backend::JourneyBackend,
    error::Result,
    models::{UserProfile, UserRole},
    params::Login,
    session::{SessionKey, SessionStore},
};

impl<B, S> JourneyTracker<B, S>
where
    B: JourneyBackend,
    S: SessionStore,
{
    /// Signs in and caches the token and profile.
    ///
    /// Any daily checklist left by a previous user of this device is
    /// discarded. The returned profile carries the account's actual role,
    /// which may differ from the one requested.
    pub async fn login(&self, params: &Login) -> Result<UserProfile> {
        let role = params.admin.then_some(UserRole::Admin);
        let session = self.backend.login(params.name.trim(), role).await?;

        self.store.save(SessionKey::Token, &session.token)?;
        self.store.save_json(SessionKey::User, &session.user)?;
        self.store.clear(SessionKey::DailyTasks)?;

        Ok(session.user)
    }

    /// Revokes the cached token and clears every session entry.
    ///
    /// Local state is cleared even when the backend call fails, and signing
    /// out while signed out is a no-op.
    pub async fn logout(&self) -> Result<()> {
        if let Some(token) = self.store.load(SessionKey::Token)? {
            if let Err(e) = self.backend.logout(&token).await {
                warn!("Failed to revoke session token: {e}");
            }
        }

        for key in [SessionKey::Token, SessionKey::User, SessionKey::DailyTasks] {
            self.store.clear(key)?;
        }
        info!("Signed out");
        Ok(())
    }

    /// The cached profile of the signed-in user.
    pub fn current_user(&self) -> Result<Option<UserProfile>> {
        if self.store.load(SessionKey::Token)?.is_none() {
            return Ok(None);
        }
        self.store.load_json(SessionKey::User)
    }
}
