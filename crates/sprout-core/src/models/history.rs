//! Archived journeys.

use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::JourneyState;

/// Outcome of an archived journey.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum HistoryStatus {
    #[default]
    Completed,
}

impl FromStr for HistoryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "completed" => Ok(HistoryStatus::Completed),
            _ => Err(format!("Invalid history status: {s}")),
        }
    }
}

impl HistoryStatus {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryStatus::Completed => "completed",
        }
    }
}

/// Immutable record of a finished journey.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HistoryEntry {
    pub crop_name: String,
    pub start_date: Date,
    pub completion_date: Date,
    /// Days since sowing at completion
    pub duration: u32,
    #[serde(default)]
    pub status: HistoryStatus,
}

impl HistoryEntry {
    /// Archives `journey` as completed on `today`.
    pub fn completed(journey: &JourneyState, today: Date) -> Self {
        Self {
            crop_name: journey.crop_name.clone(),
            start_date: journey.sowing_date,
            completion_date: today,
            duration: journey.days_since_sowing(today),
            status: HistoryStatus::Completed,
        }
    }
}
