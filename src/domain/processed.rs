// Per-reading classification output
use crate::domain::decision_tree::classify;
use crate::domain::features::derive;
use crate::domain::freshness::{assess_freshness, FreshnessClass};
use crate::domain::quality::{ProcessedResult, QualityClass};
use crate::domain::reading::RawReading;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A reading with its quality, freshness and display attributes attached.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessedReading {
    pub id: String,
    pub reading: RawReading,
    pub date_time: DateTime<Utc>,
    pub freshness: FreshnessClass,
    #[serde(flatten)]
    pub result: ProcessedResult,
}

impl ProcessedReading {
    pub fn new(id: String, reading: RawReading, now_ms: i64) -> Self {
        let quality = assess_quality(&reading);
        let freshness = assess_freshness(reading.timestamp, now_ms);
        // Out-of-range epoch values collapse to the epoch itself.
        let date_time = DateTime::from_timestamp_millis(reading.timestamp).unwrap_or_default();

        Self {
            id,
            reading,
            date_time,
            freshness,
            result: ProcessedResult::from(quality),
        }
    }

    pub fn quality(&self) -> QualityClass {
        self.result.quality
    }
}

/// Derives features from a raw reading and runs them through the decision tree.
pub fn assess_quality(reading: &RawReading) -> QualityClass {
    classify(&derive(reading))
}
