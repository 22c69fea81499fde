//! Validated, ordered crop schedules.

use std::ops::Deref;

use log::warn;
use serde::{Deserialize, Serialize};

use super::Phase;
use crate::error::{JourneyError, Result};

/// An ordered, non-empty sequence of phases for one crop.
///
/// Every phase satisfies `start_day <= end_day` and start days never decrease.
/// Gaps and overlaps between neighbouring phases are tolerated; see
/// [`Schedule::irregularities`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "Vec<Phase>", into = "Vec<Phase>")]
pub struct Schedule(Vec<Phase>);

/// A tolerated deviation from a contiguous schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Irregularity {
    /// Days between phase `after` and the next one belong to no phase
    Gap { after: usize, from_day: u32, to_day: u32 },
    /// Phase `second` starts before phase `first` has ended
    Overlap { first: usize, second: usize },
}

impl Schedule {
    /// Validates and wraps a list of phases.
    pub fn new(phases: Vec<Phase>) -> Result<Self> {
        if phases.is_empty() {
            return Err(JourneyError::invalid_input("routine").with_reason("schedule has no phases"));
        }

        for (idx, phase) in phases.iter().enumerate() {
            if phase.start_day > phase.end_day {
                return Err(JourneyError::invalid_input("routine").with_reason(format!(
                    "phase {idx} '{}' starts on day {} after it ends on day {}",
                    phase.title, phase.start_day, phase.end_day
                )));
            }
        }

        if let Some(idx) = phases
            .windows(2)
            .position(|pair| pair[1].start_day < pair[0].start_day)
        {
            return Err(JourneyError::invalid_input("routine").with_reason(format!(
                "phase {} '{}' starts before the phase preceding it",
                idx + 1,
                phases[idx + 1].title
            )));
        }

        let schedule = Self(phases);
        for irregularity in schedule.irregularities() {
            warn!("Schedule irregularity: {irregularity:?}");
        }
        Ok(schedule)
    }

    /// All phases in order.
    pub fn phases(&self) -> &[Phase] {
        &self.0
    }

    /// The final phase; schedules are never empty.
    pub fn final_phase(&self) -> &Phase {
        &self.0[self.0.len() - 1]
    }

    /// Last day covered by the schedule.
    pub fn final_day(&self) -> u32 {
        self.final_phase().end_day
    }

    /// Gaps and overlaps between neighbouring phases.
    pub fn irregularities(&self) -> Vec<Irregularity> {
        self.0
            .windows(2)
            .enumerate()
            .filter_map(|(idx, pair)| {
                let (current, next) = (&pair[0], &pair[1]);
                match current.end_day.checked_add(1) {
                    Some(day_after) if next.start_day > day_after => Some(Irregularity::Gap {
                        after: idx,
                        from_day: day_after,
                        to_day: next.start_day - 1,
                    }),
                    // Also reached when `end_day` is `u32::MAX`.
                    _ if next.start_day <= current.end_day => Some(Irregularity::Overlap {
                        first: idx,
                        second: idx + 1,
                    }),
                    _ => None,
                }
            })
            .collect()
    }

    /// Unwraps into the phase list.
    pub fn into_inner(self) -> Vec<Phase> {
        self.0
    }
}

impl Deref for Schedule {
    type Target = [Phase];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl TryFrom<Vec<Phase>> for Schedule {
    type Error = JourneyError;

    fn try_from(phases: Vec<Phase>) -> Result<Self> {
        Self::new(phases)
    }
}

impl From<Schedule> for Vec<Phase> {
    fn from(schedule: Schedule) -> Self {
        schedule.0
    }
}
