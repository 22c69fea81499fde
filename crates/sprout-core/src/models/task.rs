//! Task view of a phase.

use serde::{Deserialize, Serialize};

use super::{Phase, Protocol};

/// A phase reinterpreted as the work to do while it is active.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub title: String,
    #[serde(default)]
    pub desc: String,
    pub start_day: u32,
    pub end_day: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub protocol: Option<Protocol>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub daily_routine: Vec<String>,
}

impl From<&Phase> for Task {
    fn from(phase: &Phase) -> Self {
        Self {
            title: phase.title.clone(),
            desc: phase.desc.clone(),
            start_day: phase.start_day,
            end_day: phase.end_day,
            protocol: phase.protocol.clone(),
            daily_routine: phase.daily_subtasks(),
        }
    }
}
