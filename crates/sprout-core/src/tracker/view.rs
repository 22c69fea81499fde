//! Computed read model of an active journey.

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::{
    checklist::{ChecklistScope, DailyChecklist},
    models::{JourneyState, Task},
    progress::{self, ActivePhase},
};

/// Everything a front end needs to render the active journey.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JourneyView {
    pub journey: JourneyState,
    pub today: Date,
    pub days_since_sowing: u32,
    pub active_phase: ActivePhase,
    pub current_task: Option<Task>,
    pub next_task: Option<Task>,
    /// Headline percentage over the assumed cycle length
    pub progress_percent: f64,
    /// Timeline connector fraction in `[0, 1]`
    pub timeline_progress: f64,
    pub harvest_complete: bool,
    pub daily_checklist: DailyChecklist,
}

impl JourneyView {
    /// Computes the view of `journey` at `days_since_sowing`.
    ///
    /// The checklist is reconciled against the resulting scope, so ticks from
    /// another day, phase or journey never show up.
    pub fn compute(
        journey: JourneyState,
        today: Date,
        days_since_sowing: u32,
        cycle_days: u32,
        mut daily_checklist: DailyChecklist,
    ) -> Self {
        let active_phase = progress::compute_active_phase(&journey.schedule, days_since_sowing);
        let current_task = progress::current_task(&journey.schedule, active_phase);
        let next_task = progress::next_task(&journey.schedule, active_phase);
        let harvest_complete = progress::is_harvest_complete(&journey.schedule, days_since_sowing);

        daily_checklist.reconcile(checklist_scope(&journey, active_phase, today));

        Self {
            progress_percent: progress::progress_percent(days_since_sowing, cycle_days),
            timeline_progress: progress::segment_progress(&journey.schedule, days_since_sowing),
            journey,
            today,
            days_since_sowing,
            active_phase,
            current_task,
            next_task,
            harvest_complete,
            daily_checklist,
        }
    }

    /// Scope the daily checklist belongs to, `None` once harvest is complete.
    pub fn checklist_scope(&self) -> Option<ChecklistScope> {
        checklist_scope(&self.journey, self.active_phase, self.today)
    }

    /// Daily subtasks of the current phase.
    pub fn daily_subtasks(&self) -> &[String] {
        self.current_task
            .as_ref()
            .map(|task| task.daily_routine.as_slice())
            .unwrap_or_default()
    }

    /// Days until the next phase begins.
    pub fn days_until_next(&self) -> Option<u32> {
        self.next_task
            .as_ref()
            .map(|task| progress::days_until(task, self.days_since_sowing))
    }

    /// Whether the journey is in its last phase with nothing after it.
    pub fn is_final_stretch(&self) -> bool {
        !self.harvest_complete && self.next_task.is_none()
    }
}

pub(crate) fn checklist_scope(
    journey: &JourneyState,
    active_phase: ActivePhase,
    today: Date,
) -> Option<ChecklistScope> {
    active_phase.index().map(|phase_index| ChecklistScope {
        crop_name: journey.crop_name.clone(),
        sowing_date: journey.sowing_date,
        phase_index,
        day: today,
    })
}

/// Result of asking to start a journey.
#[derive(Debug, Clone, PartialEq)]
pub enum StartOutcome {
    /// The new journey is active
    Started(Box<JourneyView>),
    /// Another journey is active and `force` was not set; nothing changed
    Conflict { existing_crop: String },
}
