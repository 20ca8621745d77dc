//! Rule, condition, and effect definitions
//!
//! A rule is a (condition, effects, priority) triple with a stable
//! identifier. Conditions are tagged variants evaluated against the current
//! working-memory facts; effects are pure mutations of the recommendation
//! or derived facts. Everything here is serde-serializable so rule files
//! round-trip.

use agro_types::{ConditionError, ObservationField, ParcelObservation};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A declarative agronomic rule.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Stable identifier, unique within a rule set.
    pub id: String,
    /// What the rule encodes, for audit output.
    #[serde(default)]
    pub description: String,
    /// Salience: higher fires first. Non-negative by construction.
    pub priority: u32,
    /// Rule files write conditions in singleton-map form
    /// (`all_of: [...]`), not serde_yaml's default `!tag` form.
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub condition: Condition,
    #[serde(with = "serde_yaml::with::singleton_map_recursive")]
    pub effects: Vec<Effect>,
}

impl Rule {
    pub fn new(id: impl Into<String>, priority: u32, condition: Condition) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            priority,
            condition,
            effects: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }
}

/// Condition over the facts in working memory.
///
/// Numeric and label comparisons against an unknown observation field are a
/// predicate fault ([`ConditionError::UnknownField`]), not `false`: the
/// engine reports and skips the rule rather than treating missing data as
/// evidence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Always,
    Never,
    SoilMoistureBelow(f64),
    SoilMoistureAbove(f64),
    TemperatureBelow(f64),
    TemperatureAbove(f64),
    /// Case-insensitive crop label match.
    CropIs(String),
    /// Case-insensitive growth-stage label match.
    GrowthStageIs(String),
    /// Case-insensitive soil-type label match.
    SoilTypeIs(String),
    /// A derived fact inserted by an earlier firing is present.
    FlagSet(String),
    AllOf(Vec<Condition>),
    AnyOf(Vec<Condition>),
    Not(Box<Condition>),
}

impl Condition {
    /// Decide the condition against an observation and the derived-fact
    /// flags currently in working memory.
    ///
    /// Combinators keep a fault only while it is decisive: a definitive
    /// `false` branch settles an `AllOf` (and a `true` branch an `AnyOf`)
    /// regardless of faults elsewhere. `Not` over a fault faults, since
    /// unknown is not evidence of absence.
    pub fn evaluate(
        &self,
        observation: &ParcelObservation,
        flags: &BTreeSet<String>,
    ) -> Result<bool, ConditionError> {
        match self {
            Condition::Always => Ok(true),
            Condition::Never => Ok(false),
            Condition::SoilMoistureBelow(threshold) => {
                let moisture = require(observation.soil_moisture, ObservationField::SoilMoisture)?;
                Ok(moisture < *threshold)
            }
            Condition::SoilMoistureAbove(threshold) => {
                let moisture = require(observation.soil_moisture, ObservationField::SoilMoisture)?;
                Ok(moisture > *threshold)
            }
            Condition::TemperatureBelow(threshold) => {
                let temp = require(observation.temperature_c, ObservationField::TemperatureC)?;
                Ok(temp < *threshold)
            }
            Condition::TemperatureAbove(threshold) => {
                let temp = require(observation.temperature_c, ObservationField::TemperatureC)?;
                Ok(temp > *threshold)
            }
            Condition::CropIs(label) => {
                let crop = require_label(&observation.crop, ObservationField::Crop)?;
                Ok(labels_match(crop, label))
            }
            Condition::GrowthStageIs(label) => {
                let stage = require_label(&observation.growth_stage, ObservationField::GrowthStage)?;
                Ok(labels_match(stage, label))
            }
            Condition::SoilTypeIs(label) => {
                let soil = require_label(&observation.soil_type, ObservationField::SoilType)?;
                Ok(labels_match(soil, label))
            }
            Condition::FlagSet(name) => Ok(flags.contains(name)),
            Condition::AllOf(conditions) => {
                let mut fault = None;
                for condition in conditions {
                    match condition.evaluate(observation, flags) {
                        Ok(false) => return Ok(false),
                        Ok(true) => {}
                        Err(e) => fault = Some(e),
                    }
                }
                match fault {
                    Some(e) => Err(e),
                    None => Ok(true),
                }
            }
            Condition::AnyOf(conditions) => {
                let mut fault = None;
                for condition in conditions {
                    match condition.evaluate(observation, flags) {
                        Ok(true) => return Ok(true),
                        Ok(false) => {}
                        Err(e) => fault = Some(e),
                    }
                }
                match fault {
                    Some(e) => Err(e),
                    None => Ok(false),
                }
            }
            Condition::Not(inner) => Ok(!inner.evaluate(observation, flags)?),
        }
    }
}

/// Effect a firing rule applies to working memory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Effect {
    /// Propose the action label. Subject to the priority merge policy:
    /// a lower-priority proposal never displaces a higher-priority one.
    SetAction(String),
    /// Contribute justification text, concatenated in firing order.
    AppendExplanation(String),
    /// Insert a derived fact other rules can match on.
    SetFlag(String),
}

fn require(value: Option<f64>, field: ObservationField) -> Result<f64, ConditionError> {
    value.ok_or(ConditionError::UnknownField(field))
}

fn require_label<'a>(
    value: &'a Option<String>,
    field: ObservationField,
) -> Result<&'a str, ConditionError> {
    value
        .as_deref()
        .ok_or(ConditionError::UnknownField(field))
}

fn labels_match(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}
