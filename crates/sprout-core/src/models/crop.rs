//! Crop library entries.

use serde::{Deserialize, Serialize};

use super::Phase;

/// Default storage guidance shown after harvest.
pub const DEFAULT_STORAGE: &str =
    "Ensure dry and ventilated storage conditions to maintain yield quality.";
/// Default field-cleaning guidance shown after harvest.
pub const DEFAULT_CLEANING: &str =
    "Clear all crop residue to prevent pest carryover for the next season.";
/// Default soil preparation guidance shown after harvest.
pub const DEFAULT_SOIL_PREP: &str =
    "Rest and enrich the soil with organic compost before the next sowing.";

/// Guidance for the days after harvest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostHarvest {
    #[serde(default = "default_storage")]
    pub storage: String,
    #[serde(default = "default_cleaning")]
    pub cleaning: String,
    #[serde(default = "default_soil_prep")]
    pub soil_prep: String,
}

fn default_storage() -> String {
    DEFAULT_STORAGE.to_string()
}

fn default_cleaning() -> String {
    DEFAULT_CLEANING.to_string()
}

fn default_soil_prep() -> String {
    DEFAULT_SOIL_PREP.to_string()
}

impl Default for PostHarvest {
    fn default() -> Self {
        Self {
            storage: default_storage(),
            cleaning: default_cleaning(),
            soil_prep: default_soil_prep(),
        }
    }
}

/// A crop in the knowledge base, including its cultivation routine.
///
/// The routine is kept unvalidated here: library entries are edited freely and
/// only become a [`Schedule`](super::Schedule) when a journey starts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Crop {
    pub name: String,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub growing_season: Option<String>,

    /// Human label such as "120 Days"
    #[serde(default)]
    pub avg_duration: Option<String>,

    #[serde(default)]
    pub soil_preference: Option<String>,

    #[serde(default)]
    pub water_requirement: Option<String>,

    #[serde(default)]
    pub routine: Vec<Phase>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_harvest: Option<PostHarvest>,
}

impl Crop {
    /// Creates a crop with a name and routine and no other metadata.
    pub fn new(name: impl Into<String>, routine: Vec<Phase>) -> Self {
        Self {
            name: name.into(),
            category: None,
            growing_season: None,
            avg_duration: None,
            soil_preference: None,
            water_requirement: None,
            routine,
            alerts: Vec::new(),
            post_harvest: None,
        }
    }
}
