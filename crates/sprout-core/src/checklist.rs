//! Device-local daily subtask checklist.
//!
//! Ticks are never sent to the backend. The set is scoped to a journey, a
//! phase and a calendar day: [`DailyChecklist::reconcile`] drops stale ticks
//! whenever any of those change. [`DailyChecklist::toggle`] itself only flips
//! membership.

use std::collections::BTreeSet;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Identifies the journey, phase and day a set of ticks belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChecklistScope {
    pub crop_name: String,
    pub sowing_date: Date,
    pub phase_index: usize,
    pub day: Date,
}

/// Subtasks ticked for the current scope.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DailyChecklist {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<ChecklistScope>,
    #[serde(default)]
    pub done: BTreeSet<String>,
}

impl DailyChecklist {
    /// Flips `subtask` and returns the resulting set.
    pub fn toggle(&mut self, subtask: &str) -> &BTreeSet<String> {
        if !self.done.remove(subtask) {
            self.done.insert(subtask.to_string());
        }
        &self.done
    }

    /// Whether `subtask` is ticked.
    pub fn is_done(&self, subtask: &str) -> bool {
        self.done.contains(subtask)
    }

    /// Moves the checklist to `scope`, clearing ticks if it changed.
    ///
    /// Returns true when the checklist was modified.
    pub fn reconcile(&mut self, scope: Option<ChecklistScope>) -> bool {
        if self.scope == scope {
            return false;
        }
        self.done.clear();
        self.scope = scope;
        true
    }
}
