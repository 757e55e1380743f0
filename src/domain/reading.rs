// Sensor reading domain models
use serde::{Deserialize, Serialize};

/// A raw record as produced by the milk analyser hardware.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawReading {
    pub color: String,
    pub mq135: f64,
    #[serde(rename = "pH")]
    pub ph: f64,
    pub rgb: String,
    pub timestamp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

impl RawReading {
    pub fn new(color: String, mq135: f64, ph: f64, rgb: String, timestamp: i64) -> Self {
        Self {
            color,
            mq135,
            ph,
            rgb,
            timestamp,
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

/// Names of the features a decision node can test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Ph,
    Temperature,
    Taste,
    Odor,
    Fat,
    Turbidity,
    Colour,
}

/// Classifier-domain representation of a reading. `None` means unknown.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub ph: Option<f64>,
    pub temperature: Option<f64>,
    pub taste: Option<f64>,
    pub odor: Option<f64>,
    pub fat: Option<f64>,
    pub turbidity: Option<f64>,
    pub colour: Option<f64>,
}

impl FeatureVector {
    pub fn get(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Ph => self.ph,
            Feature::Temperature => self.temperature,
            Feature::Taste => self.taste,
            Feature::Odor => self.odor,
            Feature::Fat => self.fat,
            Feature::Turbidity => self.turbidity,
            Feature::Colour => self.colour,
        }
    }
}
