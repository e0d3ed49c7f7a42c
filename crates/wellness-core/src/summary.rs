use serde::{Deserialize, Serialize};

/// One research-backed insight in a digest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellnessInsight {
    /// Date in `YYYY-MM-DD`.
    pub date: String,
    pub title: String,
    pub description: String,
    /// Why this insight matters for wellness.
    pub impact: String,
    /// URL or free-text citation.
    pub source: String,
    /// Area of wellness (Nutrition, Exercise, Mental Health, Sleep, Longevity, ...).
    pub category: String,
}

/// The structured summary a language model produces for one digest run.
///
/// Every field is required; unknown keys in the model output are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellnessSummary {
    pub time_period: String,
    pub popular_trends: Vec<String>,
    pub social_buzz: Vec<String>,
    pub notable_insights: Vec<WellnessInsight>,
    pub lifestyle_recommendations: String,
    pub future_outlook: String,
}
