//! Parameter structures for tracker operations.
//!
//! These are shared by every interface (CLI, MCP) and carry no framework
//! derives beyond serde. Interface layers wrap them: the CLI converts its clap
//! argument structs into these with `From`, and the MCP server deserializes
//! them through a transparent wrapper. JSON schemas are generated only with
//! the `schema` feature.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use jiff::civil::Date;
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for signing in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Login {
    /// Account name; created on first sign-in
    pub name: String,
    /// Create the account as an admin; honoured only while no admin exists
    #[serde(default)]
    pub admin: bool,
}

/// Parameters for starting a growth journey.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct StartJourney {
    /// Name of the crop in the library
    pub crop_name: String,
    /// Sowing date as YYYY-MM-DD; defaults to today
    #[serde(default)]
    #[cfg_attr(feature = "schema", schemars(with = "Option<String>"))]
    pub sowing_date: Option<Date>,
    /// Replace an already active journey instead of reporting a conflict
    #[serde(default)]
    pub force: bool,
}

/// Parameters for toggling a phase task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ToggleTask {
    /// Title of the phase to mark done or not done
    pub task_title: String,
}

/// Parameters for toggling a daily subtask.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ToggleSubtask {
    /// Text of the subtask from the current phase's daily routine
    pub subtask: String,
}

/// Parameters for operations on one crop.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct CropName {
    /// Crop name, case-insensitive
    pub name: String,
}

/// Parameters for a crop recommendation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RecommendCrops {
    /// Soil type: Alluvial, Red or Black
    pub soil: String,
    /// Season: Summer or Winter
    pub season: String,
    /// Climate: Hot, Moderate or Cool
    pub climate: String,
}

/// Parameters for operations on one account.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UserId {
    /// Account id as shown by the user list
    pub user_id: i64,
}

/// Parameters for changing an account's role.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SetUserRole {
    /// Account id as shown by the user list
    pub user_id: i64,
    /// Grant the admin role; false demotes to farmer
    #[serde(default)]
    pub admin: bool,
}
