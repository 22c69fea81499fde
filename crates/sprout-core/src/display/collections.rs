//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper handles the empty case with a short message.

use std::fmt;

use crate::{
    models::{Crop, HistoryEntry, UserAccount},
    recommend::FALLBACK_RECOMMENDATION,
};

/// Newtype wrapper for displaying the crop library as a compact list.
///
/// ```rust
/// use sprout_core::{display::Crops, models::{Crop, Phase}};
///
/// let crops = Crops(vec![Crop::new("Millet", vec![Phase::new("Sowing", 0, 29)])]);
/// assert!(crops.to_string().contains("**Millet**"));
/// ```
pub struct Crops(pub Vec<Crop>);

impl Crops {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of crops in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Get an iterator over the crops.
    pub fn iter(&self) -> std::slice::Iter<'_, Crop> {
        self.0.iter()
    }
}

impl IntoIterator for Crops {
    type Item = Crop;
    type IntoIter = std::vec::IntoIter<Self::Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for Crops {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No crops found.");
        }

        for crop in &self.0 {
            let days = crop
                .routine
                .iter()
                .map(|p| p.end_day.saturating_add(1))
                .max()
                .unwrap_or(0);
            write!(f, "- **{}**: {} phase(s), {days} days", crop.name, crop.routine.len())?;
            if let Some(season) = &crop.growing_season {
                write!(f, ", {season}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying archived journeys.
pub struct HistoryEntries(pub Vec<HistoryEntry>);

impl HistoryEntries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the number of entries in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for HistoryEntries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No completed journeys yet.")
        } else {
            for entry in &self.0 {
                write!(f, "{entry}")?;
            }
            Ok(())
        }
    }
}

/// Newtype wrapper for displaying accounts to an admin.
pub struct Users(pub Vec<UserAccount>);

impl fmt::Display for Users {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No users found.");
        }
        for user in &self.0 {
            write!(f, "{user}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying crop suggestions.
pub struct Recommendations(pub Vec<String>);

impl fmt::Display for Recommendations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0.as_slice() {
            [] => writeln!(f, "No recommendations."),
            [only] if only == FALLBACK_RECOMMENDATION => writeln!(f, "{only}."),
            crops => {
                writeln!(f, "## Recommended crops")?;
                writeln!(f)?;
                for crop in crops {
                    writeln!(f, "- {crop}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::{
        models::{AccountStatus, HistoryStatus, Phase, UserRole},
        recommend::recommend_crops,
    };

    #[test]
    fn test_empty_collections() {
        assert_eq!(Crops(vec![]).to_string(), "No crops found.\n");
        assert_eq!(
            HistoryEntries(vec![]).to_string(),
            "No completed journeys yet.\n"
        );
        assert_eq!(Users(vec![]).to_string(), "No users found.\n");
    }

    #[test]
    fn test_crop_ending_on_last_day() {
        let crops = Crops(vec![Crop::new(
            "Fallow",
            vec![Phase::new("Rest", 0, u32::MAX)],
        )]);
        assert_eq!(
            crops.to_string(),
            format!("- **Fallow**: 1 phase(s), {} days\n", u32::MAX)
        );
    }

    #[test]
    fn test_users() {
        let output = Users(vec![
            UserAccount {
                id: 1,
                name: "asha".to_string(),
                role: UserRole::Admin,
                status: AccountStatus::Active,
            },
            UserAccount {
                id: 2,
                name: "ravi".to_string(),
                role: UserRole::Farmer,
                status: AccountStatus::Blocked,
            },
        ])
        .to_string();

        assert_eq!(
            output,
            "- **asha** (#1): admin, active\n- **ravi** (#2): farmer, blocked\n"
        );
    }

    #[test]
    fn test_history_entries() {
        let entries = HistoryEntries(vec![HistoryEntry {
            crop_name: "Wheat".to_string(),
            start_date: date(2023, 11, 1),
            completion_date: date(2024, 3, 5),
            duration: 125,
            status: HistoryStatus::Completed,
        }]);

        let output = entries.to_string();
        assert!(output.contains("## Wheat (completed)"));
        assert!(output.contains("- **Duration**: 125 days"));
    }

    #[test]
    fn test_recommendations() {
        let output = Recommendations(recommend_crops("Black", "Summer", "Hot")).to_string();
        assert!(output.contains("- Cotton"));
        assert!(output.contains("- Soybean"));

        let output = Recommendations(recommend_crops("Sandy", "Summer", "Hot")).to_string();
        assert_eq!(output, format!("{FALLBACK_RECOMMENDATION}.\n"));
    }
}
