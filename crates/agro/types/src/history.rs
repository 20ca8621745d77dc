//! History record handed to the persistence layer
use crate::observation::ParcelObservation;
use crate::recommendation::Recommendation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row of advice history: the inputs that provoked a recommendation and
/// the recommendation itself.
///
/// Built by the calling service after an evaluation returns; the engine
/// never reads it back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub recorded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_moisture: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_stage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,
    pub action: String,
    pub explanation: String,
}

impl HistoryRecord {
    /// Capture an observation and its final recommendation, timestamped now.
    pub fn capture(observation: &ParcelObservation, recommendation: &Recommendation) -> Self {
        Self {
            recorded_at: Utc::now(),
            soil_moisture: observation.soil_moisture,
            temperature_c: observation.temperature_c,
            crop: observation.crop.clone(),
            growth_stage: observation.growth_stage.clone(),
            soil_type: observation.soil_type.clone(),
            action: recommendation.action.clone(),
            explanation: recommendation.explanation.clone(),
        }
    }
}
