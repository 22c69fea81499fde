//! Journey state: one user's in-progress cultivation cycle.

use std::collections::BTreeSet;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use super::{PostHarvest, Schedule};

/// Whole days from `from` to `to`, negative when `to` is earlier.
pub fn days_between(from: Date, to: Date) -> i64 {
    i64::from((to - from).get_days())
}

/// An active growth journey.
///
/// The schedule is a snapshot taken when the journey started, so later edits
/// to the crop library do not change an in-progress journey.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JourneyState {
    /// Crop being cultivated
    pub crop_name: String,

    /// Calendar date of sowing
    pub sowing_date: Date,

    /// Routine snapshot
    pub schedule: Schedule,

    /// Phase titles the user has marked done
    #[serde(default)]
    pub completed_task_titles: BTreeSet<String>,

    /// Guidance shown once harvest is complete
    #[serde(default)]
    pub post_harvest: PostHarvest,
}

impl JourneyState {
    /// Starts a journey with no completed tasks.
    pub fn start(crop_name: impl Into<String>, schedule: Schedule, sowing_date: Date) -> Self {
        Self {
            crop_name: crop_name.into(),
            sowing_date,
            schedule,
            completed_task_titles: BTreeSet::new(),
            post_harvest: PostHarvest::default(),
        }
    }

    /// Elapsed whole days since sowing, clamped at zero for future sowing
    /// dates.
    pub fn days_since_sowing(&self, today: Date) -> u32 {
        let days = days_between(self.sowing_date, today).max(0);
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    /// Whether the phase task with `title` is marked done.
    pub fn is_task_completed(&self, title: &str) -> bool {
        self.completed_task_titles.contains(title)
    }

    /// Flips the completion of `title` and returns whether it is now done.
    pub fn toggle_task(&mut self, title: &str) -> bool {
        if self.completed_task_titles.remove(title) {
            false
        } else {
            self.completed_task_titles.insert(title.to_string());
            true
        }
    }
}
