//! Data models for crops, schedules and journeys.
//!
//! Display implementations for these models live in
//! [`crate::display::models`].
//!
//! # Examples
//!
//! ```rust
//! use jiff::civil::date;
//! use sprout_core::models::{JourneyState, Phase, Schedule};
//!
//! let schedule = Schedule::new(vec![
//!     Phase::new("Sowing", 0, 29),
//!     Phase::new("Growth", 30, 89),
//!     Phase::new("Harvest", 90, 119),
//! ])
//! .unwrap();
//!
//! let journey = JourneyState::start("Wheat", schedule, date(2025, 1, 1));
//! assert_eq!(journey.days_since_sowing(date(2025, 2, 15)), 45);
//! ```

pub mod crop;
pub mod history;
pub mod journey;
pub mod phase;
pub mod schedule;
pub mod status;
pub mod task;
pub mod user;

#[cfg(test)]
mod tests;

pub use crop::{Crop, PostHarvest};
pub use history::{HistoryEntry, HistoryStatus};
pub use journey::{days_between, JourneyState};
pub use phase::{Phase, Protocol};
pub use schedule::{Irregularity, Schedule};
pub use status::{ActiveStatus, TaskCompletion};
pub use task::Task;
pub use user::{AccountStatus, AuthSession, UserAccount, UserProfile, UserRole};
