//! Parcel observation facts
use serde::{Deserialize, Serialize};
use std::fmt;

/// A snapshot of observed field conditions for one parcel.
///
/// Every field is optional: `None` means the value was not observed, which
/// is distinct from any concrete reading. Rule conditions that need an
/// absent field fault instead of comparing against a default.
/// Immutable once constructed for a session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
pub struct ParcelObservation {
    /// Soil moisture in percent (0-100).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_moisture: Option<f64>,
    /// Air temperature in degrees Celsius.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    /// Crop label, e.g. "wheat".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<String>,
    /// Growth stage label, e.g. "flowering".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub growth_stage: Option<String>,
    /// Soil type label, e.g. "sandy", "clay".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_type: Option<String>,
}

impl ParcelObservation {
    /// An observation with every field unknown.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_soil_moisture(mut self, percent: f64) -> Self {
        self.soil_moisture = Some(percent);
        self
    }

    pub fn with_temperature_c(mut self, degrees: f64) -> Self {
        self.temperature_c = Some(degrees);
        self
    }

    pub fn with_crop(mut self, crop: impl Into<String>) -> Self {
        self.crop = Some(crop.into());
        self
    }

    pub fn with_growth_stage(mut self, stage: impl Into<String>) -> Self {
        self.growth_stage = Some(stage.into());
        self
    }

    pub fn with_soil_type(mut self, soil: impl Into<String>) -> Self {
        self.soil_type = Some(soil.into());
        self
    }

    /// True when no field carries a reading.
    pub fn is_empty(&self) -> bool {
        self.soil_moisture.is_none()
            && self.temperature_c.is_none()
            && self.crop.is_none()
            && self.growth_stage.is_none()
            && self.soil_type.is_none()
    }
}

impl fmt::Display for ParcelObservation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn opt_num(v: Option<f64>) -> String {
            v.map(|v| v.to_string()).unwrap_or_else(|| "?".into())
        }
        fn opt_label(v: &Option<String>) -> &str {
            v.as_deref().unwrap_or("?")
        }
        write!(
            f,
            "Parcel(moisture={}% temp={}C crop={} stage={} soil={})",
            opt_num(self.soil_moisture),
            opt_num(self.temperature_c),
            opt_label(&self.crop),
            opt_label(&self.growth_stage),
            opt_label(&self.soil_type),
        )
    }
}
