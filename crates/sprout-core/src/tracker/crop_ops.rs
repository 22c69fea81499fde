//! Crop library operations for the JourneyTracker.

use log::info;

use super::JourneyTracker;
use crate::{
    backend::JourneyBackend,
    error::{JourneyError, Result},
    models::{Crop, Schedule},
    params::CropName,
    session::SessionStore,
};

impl<B, S> JourneyTracker<B, S>
where
    B: JourneyBackend,
    S: SessionStore,
{
    /// Every crop in the library.
    pub async fn crops(&self) -> Result<Vec<Crop>> {
        self.backend.crops().await
    }

    /// Looks up one crop by name, ignoring case.
    pub async fn crop(&self, params: &CropName) -> Result<Option<Crop>> {
        self.backend.crop(params.name.trim()).await
    }

    /// Adds or replaces library crops. Requires the admin role.
    ///
    /// Every routine is validated before anything is written, so a bad entry
    /// leaves the library untouched. Returns the number of crops saved.
    pub async fn import_crops(&self, crops: Vec<Crop>) -> Result<usize> {
        let token = self.token()?;

        for crop in &crops {
            if crop.name.trim().is_empty() {
                return Err(JourneyError::invalid_input("name").with_reason("must not be empty"));
            }
            Schedule::new(crop.routine.clone()).map_err(|e| {
                JourneyError::invalid_input(format!("{}.routine", crop.name))
                    .with_reason(e.to_string())
            })?;
        }

        let count = crops.len();
        for crop in crops {
            self.backend.save_crop(&token, crop).await?;
        }
        info!("Imported {count} crop(s)");
        Ok(count)
    }

    /// Removes a crop from the library. Requires the admin role.
    ///
    /// Active journeys keep their routine snapshot.
    pub async fn remove_crop(&self, params: &CropName) -> Result<bool> {
        let token = self.token()?;
        self.backend.delete_crop(&token, params.name.trim()).await
    }
}
