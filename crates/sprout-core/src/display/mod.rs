//! Display formatting for journeys, crops and operation results.
//!
//! Domain types implement `Display` directly and produce markdown, which the
//! CLI renders with termimad and the MCP server returns verbatim. Collections
//! are wrapped in newtypes so that empty lists get a friendly message.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Newtype Wrappers│    │   Formatted     │
//! │ (JourneyView,   │───▶│ & Status Types  │───▶│    Output       │
//! │  Crop, History) │    │                 │    │  (Terminal/MCP) │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Collection wrapper types (Crops, HistoryEntries,
//!   Recommendations, Users)
//! - [`status`]: Status and confirmation messages (OperationStatus)
//! - [`models`]: Display implementations for domain models
//!
//! ```rust
//! use sprout_core::display::OperationStatus;
//!
//! let success = OperationStatus::success("Journey completed".to_string());
//! assert!(success.to_string().contains("Success:"));
//! ```

pub mod collections;
pub mod models;
pub mod status;

pub use collections::{Crops, HistoryEntries, Recommendations, Users};
pub use status::OperationStatus;
