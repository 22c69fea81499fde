//! High-level journey tracker API.
//!
//! [`JourneyTracker`] is the single entry point used by the CLI and the MCP
//! server. It combines a [`JourneyBackend`] (authoritative journey state), a
//! [`SessionStore`] (token, profile and daily checklist on this device) and a
//! [`Clock`], and turns backend payloads into [`JourneyView`]s.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI / MCP     │───▶│ JourneyTracker  │───▶│ JourneyBackend  │
//! └─────────────────┘    └────────┬────────┘    └─────────────────┘
//!                                 │
//!                                 ▼
//!                        ┌─────────────────┐
//!                        │  SessionStore   │
//!                        └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: Factory for trackers over the local SQLite backend
//! - [`view`]: The computed read model of an active journey
//! - [`account_ops`]: Sign-in and sign-out
//! - [`journey_ops`]: Status, start, toggle, complete and history
//! - [`checklist_ops`]: The device-local daily checklist
//! - [`crop_ops`]: Crop library access
//! - [`user_ops`]: Account administration
//!
//! Mutating journey operations hold an internal lock for their whole
//! write-then-refetch sequence, so at most one mutation is in flight per
//! tracker.
//!
//! ```rust,no_run
//! use sprout_core::{params::{Login, StartJourney}, StartOutcome, TrackerBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new().build().await?;
//! tracker
//!     .login(&Login { name: "asha".to_string(), admin: false })
//!     .await?;
//!
//! let outcome = tracker
//!     .start_journey(&StartJourney {
//!         crop_name: "Rice".to_string(),
//!         sowing_date: None,
//!         force: false,
//!     })
//!     .await?;
//! if let StartOutcome::Conflict { existing_crop } = outcome {
//!     println!("Already growing {existing_crop}");
//! }
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::{
    backend::{JourneyBackend, LocalBackend},
    clock::Clock,
    error::{JourneyError, Result},
    session::{SessionKey, SessionStore, SqliteSessionStore},
};

pub mod account_ops;
pub mod builder;
pub mod checklist_ops;
pub mod crop_ops;
pub mod journey_ops;
pub mod user_ops;
pub mod view;


pub use builder::TrackerBuilder;
pub use view::{JourneyView, StartOutcome};

/// Tracker over the SQLite backend and session cache.
pub type LocalTracker = JourneyTracker<LocalBackend, SqliteSessionStore>;

/// Coordinates the backend, the session cache and the clock.
pub struct JourneyTracker<B, S> {
    pub(crate) backend: B,
    pub(crate) store: S,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) cycle_days: u32,
    pub(crate) mutation: Mutex<()>,
}

impl<B, S> JourneyTracker<B, S>
where
    B: JourneyBackend,
    S: SessionStore,
{
    /// Creates a tracker from its collaborators.
    pub fn new(backend: B, store: S, clock: Arc<dyn Clock>, cycle_days: u32) -> Self {
        Self {
            backend,
            store,
            clock,
            cycle_days,
            mutation: Mutex::new(()),
        }
    }

    /// The session cache.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Cycle length used for the headline percentage.
    pub fn cycle_days(&self) -> u32 {
        self.cycle_days
    }

    /// The cached bearer token, or `Unauthorized` when signed out.
    pub(crate) fn token(&self) -> Result<String> {
        self.store
            .load(SessionKey::Token)?
            .ok_or(JourneyError::Unauthorized)
    }
}
