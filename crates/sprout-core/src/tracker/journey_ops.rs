//! Journey operations for the JourneyTracker.

use log::{debug, info, warn};

use super::{JourneyTracker, JourneyView, StartOutcome};
use crate::{
    backend::JourneyBackend,
    error::{JourneyError, Result},
    models::{ActiveStatus, HistoryEntry},
    params::{StartJourney, ToggleTask},
    session::{SessionKey, SessionStore},
};

impl<B, S> JourneyTracker<B, S>
where
    B: JourneyBackend,
    S: SessionStore,
{
    /// The active journey as of today, or `None` when there is none.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::Unauthorized` when signed out and
    /// `JourneyError::MalformedPayload` when the backend reports an active
    /// journey without a crop, sowing date or valid routine.
    pub async fn status(&self) -> Result<Option<JourneyView>> {
        let token = self.token()?;
        let status = self.backend.active_status(&token).await?;
        self.view_from_status(status)
    }

    /// Starts a journey for `params.crop_name`.
    ///
    /// With an active journey and `force` unset, nothing is changed and
    /// [`StartOutcome::Conflict`] names the crop already being grown. With
    /// `force` the old journey is discarded without being archived. The
    /// sowing date defaults to today.
    pub async fn start_journey(&self, params: &StartJourney) -> Result<StartOutcome> {
        let crop_name = params.crop_name.trim();
        if crop_name.is_empty() {
            return Err(JourneyError::invalid_input("crop_name").with_reason("must not be empty"));
        }

        let _guard = self.mutation.lock().await;
        let token = self.token()?;

        if !params.force {
            let existing = self.backend.active_status(&token).await?;
            if existing.active {
                let existing_crop = existing.crop_name.unwrap_or_default();
                debug!("start_journey: conflict with active {existing_crop} journey");
                return Ok(StartOutcome::Conflict { existing_crop });
            }
        }

        let sowing_date = params.sowing_date.unwrap_or_else(|| self.clock.today());
        self.backend
            .start_followup(&token, crop_name, sowing_date)
            .await?;
        self.store.clear(SessionKey::DailyTasks)?;

        let view = self.refetch(&token).await?;
        info!(
            "Journey started: {} sown on {}",
            view.journey.crop_name, view.journey.sowing_date
        );
        Ok(StartOutcome::Started(Box::new(view)))
    }

    /// Flips the completion of a phase task and returns the refreshed view.
    pub async fn toggle_task(&self, params: &ToggleTask) -> Result<JourneyView> {
        let _guard = self.mutation.lock().await;
        let token = self.token()?;

        let completion = self
            .backend
            .toggle_task(&token, &params.task_title)
            .await?;
        debug!(
            "toggle_task: backend reports {} completed task(s)",
            completion.completed_tasks.len()
        );

        self.refetch(&token).await
    }

    /// Archives the active journey once harvest is complete.
    ///
    /// # Errors
    ///
    /// Returns `JourneyError::NoActiveJourney` when nothing is active and
    /// `JourneyError::InvalidState` before the final phase has ended.
    pub async fn complete_journey(&self) -> Result<HistoryEntry> {
        let _guard = self.mutation.lock().await;
        let token = self.token()?;

        let status = self.backend.active_status(&token).await?;
        let view = self
            .view_from_status(status)?
            .ok_or(JourneyError::NoActiveJourney)?;
        if !view.harvest_complete {
            return Err(JourneyError::invalid_state(format!(
                "harvest of {} is not complete: day {} of {}",
                view.journey.crop_name,
                view.days_since_sowing,
                view.journey.schedule.final_day()
            )));
        }

        let entry = self.backend.complete_journey(&token).await?;
        self.store.clear(SessionKey::DailyTasks)?;

        if self.backend.active_status(&token).await?.active {
            warn!("Backend still reports an active journey after completion");
        }
        info!(
            "Journey completed: {} after {} days",
            entry.crop_name, entry.duration
        );
        Ok(entry)
    }

    /// Archived journeys, most recent first.
    pub async fn history(&self) -> Result<Vec<HistoryEntry>> {
        let token = self.token()?;
        self.backend.history(&token).await
    }

    /// Re-reads the authoritative status after a write.
    async fn refetch(&self, token: &str) -> Result<JourneyView> {
        let status = self.backend.active_status(token).await?;
        self.view_from_status(status)?
            .ok_or(JourneyError::NoActiveJourney)
    }

    /// Builds the view for a status payload and persists any checklist
    /// reconciliation.
    ///
    /// A day count reported by the backend wins over the local clock.
    pub(crate) fn view_from_status(&self, status: ActiveStatus) -> Result<Option<JourneyView>> {
        let today = self.clock.today();
        let reported_days = status.days_since_sowing;
        let Some(journey) = status.into_journey()? else {
            return Ok(None);
        };
        let days = reported_days.unwrap_or_else(|| journey.days_since_sowing(today));

        let checklist = self.load_checklist()?;
        let view = JourneyView::compute(journey, today, days, self.cycle_days, checklist.clone());
        if view.daily_checklist != checklist {
            self.store
                .save_json(SessionKey::DailyTasks, &view.daily_checklist)?;
        }
        Ok(Some(view))
    }
}
