//! Rule-based crop suggestions and per-crop farming guidance.

use serde::{Deserialize, Serialize};

/// Returned when no rule matches the conditions.
pub const FALLBACK_RECOMMENDATION: &str = "Local crops based on local expertise";

/// Crops suited to a soil type, season and climate.
///
/// Matching ignores case and surrounding whitespace. Unknown combinations
/// yield [`FALLBACK_RECOMMENDATION`].
pub fn recommend_crops(soil: &str, season: &str, climate: &str) -> Vec<String> {
    let key = (
        soil.trim().to_lowercase(),
        season.trim().to_lowercase(),
        climate.trim().to_lowercase(),
    );

    let crops: &[&str] = match (key.0.as_str(), key.1.as_str(), key.2.as_str()) {
        ("alluvial", "summer", "hot") => &["Rice", "Sugar Cane"],
        ("alluvial", "summer", "moderate") => &["Rice", "Banana"],
        ("alluvial", "winter", "cool") => &["Wheat", "Mustard"],
        ("alluvial", "winter", "moderate") => &["Maize"],
        ("red", "summer", "hot") => &["Groundnut", "Ragi"],
        ("red", "summer", "moderate") => &["Tobacco"],
        ("red", "winter", "cool") => &["Wheat", "Potato"],
        ("red", "winter", "moderate") => &["Maize"],
        ("black", "summer", "hot") => &["Cotton", "Soybean"],
        ("black", "summer", "moderate") => &["Sorghum"],
        ("black", "winter", "cool") => &["Wheat", "Linseed"],
        ("black", "winter", "moderate") => &["Gram"],
        _ => &[FALLBACK_RECOMMENDATION],
    };

    crops.iter().map(|crop| (*crop).to_string()).collect()
}

/// Headline cultivation advice for a crop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Guidance {
    pub irrigation: String,
    pub fertilizer: String,
    pub pests: String,
    pub harvest: String,
}

impl Guidance {
    fn new(irrigation: &str, fertilizer: &str, pests: &str, harvest: &str) -> Self {
        Self {
            irrigation: irrigation.to_string(),
            fertilizer: fertilizer.to_string(),
            pests: pests.to_string(),
            harvest: harvest.to_string(),
        }
    }
}

/// Guidance for `crop`, or generic practice for crops without an entry.
pub fn farming_guidance(crop: &str) -> Guidance {
    match crop.trim().to_lowercase().as_str() {
        "rice" => Guidance::new(
            "High (Maintain standing water)",
            "Urea, DAP, MOP",
            "Stem borer, Leaf holder",
            "3-4 months after transplanting",
        ),
        "wheat" => Guidance::new(
            "Moderate (4-6 irrigations)",
            "NPK, Urea",
            "Brown rust, Aphids",
            "120-150 days",
        ),
        "cotton" => Guidance::new(
            "Regular but controlled",
            "Nitrogen, Phosphorus",
            "Bollworm, Whitefly",
            "5-6 months",
        ),
        _ => Guidance::new(
            "Standard practices",
            "Organic compost",
            "Generic pest control",
            "Depends on growth",
        ),
    }
}
