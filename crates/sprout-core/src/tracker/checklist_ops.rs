//! Daily checklist operations for the JourneyTracker.

use std::collections::BTreeSet;

use log::debug;

use super::JourneyTracker;
use crate::{
    backend::JourneyBackend,
    checklist::DailyChecklist,
    error::{JourneyError, Result},
    params::ToggleSubtask,
    session::{SessionKey, SessionStore},
};

impl<B, S> JourneyTracker<B, S>
where
    B: JourneyBackend,
    S: SessionStore,
{
    /// Today's checklist for the current phase.
    ///
    /// Returns an empty checklist when no journey is active or harvest is
    /// complete.
    pub async fn daily_checklist(&self) -> Result<DailyChecklist> {
        Ok(self
            .status()
            .await?
            .map(|view| view.daily_checklist)
            .unwrap_or_default())
    }

    /// Ticks or unticks a subtask of the current phase's daily routine and
    /// returns the ticked set.
    ///
    /// The checklist never reaches the backend. Toggles share the tracker's
    /// mutation lock, so concurrent calls each see the previous write.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::NoActiveJourney` when nothing is active,
    /// `JourneyError::InvalidState` after harvest and
    /// `JourneyError::InvalidInput` when `subtask` is not in today's routine.
    pub async fn toggle_daily_subtask(&self, params: &ToggleSubtask) -> Result<BTreeSet<String>> {
        let _guard = self.mutation.lock().await;
        let mut view = self.status().await?.ok_or(JourneyError::NoActiveJourney)?;
        if view.harvest_complete {
            return Err(JourneyError::invalid_state(
                "harvest is complete; there is no daily routine",
            ));
        }

        let subtask = params.subtask.trim();
        if !view.daily_subtasks().iter().any(|s| s == subtask) {
            return Err(JourneyError::invalid_input("subtask").with_reason(format!(
                "'{subtask}' is not part of today's routine"
            )));
        }

        let done = view.daily_checklist.toggle(subtask).clone();
        self.store
            .save_json(SessionKey::DailyTasks, &view.daily_checklist)?;
        debug!("toggle_daily_subtask: {} of {} done", done.len(), view.daily_subtasks().len());
        Ok(done)
    }

    /// The cached checklist, empty when absent or unreadable.
    pub(crate) fn load_checklist(&self) -> Result<DailyChecklist> {
        Ok(self
            .store
            .load_json(SessionKey::DailyTasks)?
            .unwrap_or_default())
    }
}
