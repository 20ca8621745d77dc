//! Error types shared across the AgroTrace crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Observation fields a rule condition can reference.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObservationField {
    SoilMoisture,
    TemperatureC,
    Crop,
    GrowthStage,
    SoilType,
}

impl fmt::Display for ObservationField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObservationField::SoilMoisture => "soil_moisture",
            ObservationField::TemperatureC => "temperature_c",
            ObservationField::Crop => "crop",
            ObservationField::GrowthStage => "growth_stage",
            ObservationField::SoilType => "soil_type",
        };
        write!(f, "{}", name)
    }
}

/// A rule condition that could not be decided against the current facts.
///
/// Predicate faults are recoverable: the engine treats the rule as
/// non-matching for the cycle and reports a diagnostic instead of
/// aborting the session.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConditionError {
    /// The condition compares against a field the observation does not carry.
    #[error("field {0} is unknown in this observation")]
    UnknownField(ObservationField),
}
