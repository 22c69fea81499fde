//! Wire payloads exchanged with the journey backend.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{JourneyState, Phase, PostHarvest, Schedule, Task};
use crate::{
    error::{JourneyError, Result},
    progress::{self, ActivePhase},
};

/// Payload of the active-status call.
///
/// Every field defaults so that partial payloads still deserialize; use
/// [`ActiveStatus::into_journey`] to validate.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActiveStatus {
    #[serde(default)]
    pub active: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crop_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sowing_date: Option<Date>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub days_since_sowing: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routine: Option<Vec<Phase>>,

    #[serde(default)]
    pub completed_tasks: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_task: Option<Task>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_task: Option<Task>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_harvest: Option<PostHarvest>,
}

impl ActiveStatus {
    /// Status reported when no journey is running.
    pub fn inactive() -> Self {
        Self::default()
    }

    /// Builds the payload for `journey` as of `today`.
    pub fn from_journey(journey: &JourneyState, today: Date) -> Self {
        let days = journey.days_since_sowing(today);
        let active = progress::compute_active_phase(&journey.schedule, days);

        Self {
            active: true,
            crop_name: Some(journey.crop_name.clone()),
            sowing_date: Some(journey.sowing_date),
            days_since_sowing: Some(days),
            routine: Some(journey.schedule.phases().to_vec()),
            completed_tasks: journey.completed_task_titles.iter().cloned().collect(),
            current_task: progress::current_task(&journey.schedule, active),
            next_task: progress::next_task(&journey.schedule, active),
            post_harvest: match active {
                ActivePhase::HarvestComplete => Some(journey.post_harvest.clone()),
                ActivePhase::Phase(_) => None,
            },
        }
    }

    /// Validates the payload into a journey, or `None` when inactive.
    pub fn into_journey(self) -> Result<Option<JourneyState>> {
        if !self.active {
            return Ok(None);
        }

        let crop_name = self
            .crop_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| JourneyError::malformed("crop_name", "missing for active journey"))?;
        let sowing_date = self
            .sowing_date
            .ok_or_else(|| JourneyError::malformed("sowing_date", "missing for active journey"))?;
        let routine = self
            .routine
            .ok_or_else(|| JourneyError::malformed("routine", "missing for active journey"))?;
        let schedule = Schedule::new(routine)
            .map_err(|e| JourneyError::malformed("routine", e.to_string()))?;

        Ok(Some(JourneyState {
            crop_name,
            sowing_date,
            schedule,
            completed_task_titles: self.completed_tasks.into_iter().collect(),
            post_harvest: self.post_harvest.unwrap_or_default(),
        }))
    }
}

/// Payload of the toggle-task call.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskCompletion {
    #[serde(default)]
    pub completed_tasks: Vec<String>,
}
