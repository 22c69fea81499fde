//! Core library for the Sprout growth journey tracker.
//!
//! A growth journey follows one crop from sowing to harvest. This crate turns
//! a crop's phase schedule, the sowing date and today's date into actionable
//! state (active phase, current and next task, progress figures), manages the
//! device-local daily checklist, and keeps journeys and their history in a
//! local SQLite database.
//!
//! # Layers
//!
//! - [`progress`]: Pure day-indexed progression over a [`models::Schedule`]
//! - [`backend`]: The journey API contract and its SQLite implementation
//! - [`session`]: Cached token, profile and daily checklist
//! - [`tracker`]: The [`JourneyTracker`] facade used by every interface
//! - [`display`]: Markdown formatting for terminal and MCP output
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use sprout_core::{
//!     params::{Login, StartJourney},
//!     StartOutcome, TrackerBuilder,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let tracker = TrackerBuilder::new()
//!     .with_database_path(Some("sprout.db"))
//!     .build()
//!     .await?;
//!
//! tracker
//!     .login(&Login { name: "asha".to_string(), admin: false })
//!     .await?;
//!
//! let outcome = tracker
//!     .start_journey(&StartJourney {
//!         crop_name: "Wheat".to_string(),
//!         sowing_date: None,
//!         force: false,
//!     })
//!     .await?;
//! println!("{outcome}");
//!
//! if let Some(view) = tracker.status().await? {
//!     println!("Day {} of the {} journey", view.days_since_sowing, view.journey.crop_name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod checklist;
pub mod clock;
pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod progress;
pub mod recommend;
pub mod session;
pub mod tracker;

// Re-export commonly used types
pub use backend::{JourneyBackend, LocalBackend};
pub use checklist::{ChecklistScope, DailyChecklist};
pub use clock::{Clock, FixedClock, SystemClock};
pub use db::Database;
pub use display::{Crops, HistoryEntries, OperationStatus, Recommendations, Users};
pub use error::{JourneyError, Result};
pub use models::{
    AccountStatus, ActiveStatus, Crop, HistoryEntry, JourneyState, Phase, PostHarvest, Schedule,
    Task, UserAccount, UserProfile, UserRole,
};
pub use progress::{ActivePhase, DEFAULT_CYCLE_DAYS};
pub use session::{MemorySessionStore, SessionKey, SessionStore, SqliteSessionStore};
pub use tracker::{JourneyTracker, JourneyView, LocalTracker, StartOutcome, TrackerBuilder};
