//! Day-indexed progression over a crop schedule.
//!
//! Everything here is a pure function of a [`Schedule`] and the number of
//! whole days elapsed since sowing. The tracker and the backend both build on
//! these functions, so the dashboard, the CLI and the server always agree on
//! which phase is active.
//!
//! ```rust
//! use sprout_core::{
//!     models::{Phase, Schedule},
//!     progress::{self, ActivePhase},
//! };
//!
//! let schedule = Schedule::new(vec![
//!     Phase::new("Sowing", 0, 29),
//!     Phase::new("Growth", 30, 89),
//!     Phase::new("Harvest", 90, 119),
//! ])
//! .unwrap();
//!
//! let active = progress::compute_active_phase(&schedule, 45);
//! assert_eq!(active, ActivePhase::Phase(1));
//! assert_eq!(progress::next_task(&schedule, active).unwrap().title, "Harvest");
//! assert_eq!(progress::progress_percent(45, progress::DEFAULT_CYCLE_DAYS), 38.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::models::{Schedule, Task};

/// Cycle length used for the headline percentage when none is configured.
///
/// The percentage is deliberately not derived from the schedule's final day,
/// so crops with longer or shorter cycles show a skewed figure.
pub const DEFAULT_CYCLE_DAYS: u32 = 120;

/// Where a journey stands on its schedule.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActivePhase {
    /// Index of the phase currently in progress
    Phase(usize),
    /// Elapsed days exceed the final phase's end day
    HarvestComplete,
}

impl ActivePhase {
    /// The phase index, if harvest is not yet complete.
    pub fn index(self) -> Option<usize> {
        match self {
            ActivePhase::Phase(idx) => Some(idx),
            ActivePhase::HarvestComplete => None,
        }
    }
}

/// True iff `days_since_sowing` is past the final phase's end day.
pub fn is_harvest_complete(schedule: &Schedule, days_since_sowing: u32) -> bool {
    days_since_sowing > schedule.final_day()
}

/// Resolves the active phase for `days_since_sowing`.
///
/// The first phase whose window contains the day wins, so overlapping windows
/// resolve in list order. Days before the first window map to phase 0. Days in
/// a gap between two windows map to the latest phase that has already started.
pub fn compute_active_phase(schedule: &Schedule, days_since_sowing: u32) -> ActivePhase {
    if is_harvest_complete(schedule, days_since_sowing) {
        return ActivePhase::HarvestComplete;
    }

    if let Some(idx) = schedule
        .iter()
        .position(|phase| phase.contains(days_since_sowing))
    {
        return ActivePhase::Phase(idx);
    }

    let started = schedule
        .iter()
        .rposition(|phase| phase.start_day <= days_since_sowing)
        .unwrap_or(0);
    ActivePhase::Phase(started)
}

/// The active phase as a task, or `None` once harvest is complete.
pub fn current_task(schedule: &Schedule, active: ActivePhase) -> Option<Task> {
    active
        .index()
        .and_then(|idx| schedule.get(idx))
        .map(Task::from)
}

/// The phase after the active one, if any.
///
/// `None` while harvest is pending means the journey is in its final stretch.
pub fn next_task(schedule: &Schedule, active: ActivePhase) -> Option<Task> {
    active
        .index()
        .and_then(|idx| schedule.get(idx + 1))
        .map(Task::from)
}

/// Days remaining until `task` starts, zero if it already has.
pub fn days_until(task: &Task, days_since_sowing: u32) -> u32 {
    task.start_day.saturating_sub(days_since_sowing)
}

/// Headline completion percentage against a fixed cycle length.
///
/// `min(100, round(100 * days / assumed_total_days))`. A zero cycle length is
/// treated as already complete.
pub fn progress_percent(days_since_sowing: u32, assumed_total_days: u32) -> f64 {
    if assumed_total_days == 0 {
        return 100.0;
    }
    let ratio = f64::from(days_since_sowing) / f64::from(assumed_total_days);
    (100.0 * ratio).round().min(100.0)
}

/// Fraction of the phase timeline covered, in `[0, 1]`.
///
/// Interpolates between the start days of the two phases surrounding
/// `days_since_sowing`. Reaches 1.0 once the final phase has started and stays
/// at 0.0 until the second phase's segment begins.
pub fn segment_progress(schedule: &Schedule, days_since_sowing: u32) -> f64 {
    let Some(upcoming) = schedule
        .iter()
        .position(|phase| phase.start_day > days_since_sowing)
    else {
        return 1.0;
    };

    if upcoming == 0 {
        return 0.0;
    }

    let current = upcoming - 1;
    let segment_start = schedule[current].start_day;
    let segment_end = schedule[upcoming].start_day;

    let within = if days_since_sowing >= segment_end {
        1.0
    } else if days_since_sowing > segment_start {
        f64::from(days_since_sowing - segment_start) / f64::from(segment_end - segment_start)
    } else {
        0.0
    };

    let segments = (schedule.len() - 1) as f64;
    ((current as f64 + within) / segments).clamp(0.0, 1.0)
}
