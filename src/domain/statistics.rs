// Batch statistics over classified readings
use crate::domain::processed::{assess_quality, ProcessedReading};
use crate::domain::quality::QualityClass;
use crate::domain::reading::RawReading;
use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::ops::Add;

/// Per-class counts. Merging partial tallies is commutative and associative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QualityTally {
    pub baik: usize,
    pub sedang: usize,
    pub buruk: usize,
}

impl QualityTally {
    pub fn record(&mut self, quality: QualityClass) {
        match quality {
            QualityClass::Baik => self.baik += 1,
            QualityClass::Sedang => self.sedang += 1,
            QualityClass::Buruk => self.buruk += 1,
        }
    }

    pub fn from_readings(readings: &[RawReading]) -> Self {
        readings.iter().map(assess_quality).collect()
    }

    pub fn total(&self) -> usize {
        self.baik + self.sedang + self.buruk
    }

    pub fn count(&self, quality: QualityClass) -> usize {
        match quality {
            QualityClass::Baik => self.baik,
            QualityClass::Sedang => self.sedang,
            QualityClass::Buruk => self.buruk,
        }
    }
}

impl Add for QualityTally {
    type Output = QualityTally;

    fn add(self, other: QualityTally) -> QualityTally {
        QualityTally {
            baik: self.baik + other.baik,
            sedang: self.sedang + other.sedang,
            buruk: self.buruk + other.buruk,
        }
    }
}

impl FromIterator<QualityClass> for QualityTally {
    fn from_iter<I: IntoIterator<Item = QualityClass>>(iter: I) -> Self {
        let mut tally = QualityTally::default();
        for quality in iter {
            tally.record(quality);
        }
        tally
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchStatistics {
    pub total: usize,
    pub baik: usize,
    pub sedang: usize,
    pub buruk: usize,
    pub baik_pct: f64,
    pub sedang_pct: f64,
    pub buruk_pct: f64,
}

impl From<QualityTally> for BatchStatistics {
    fn from(tally: QualityTally) -> Self {
        let total = tally.total();
        Self {
            total,
            baik: tally.baik,
            sedang: tally.sedang,
            buruk: tally.buruk,
            baik_pct: pct(tally.baik, total),
            sedang_pct: pct(tally.sedang, total),
            buruk_pct: pct(tally.buruk, total),
        }
    }
}

/// Classifies every reading and folds the labels into batch statistics.
pub fn aggregate(readings: &[RawReading]) -> BatchStatistics {
    QualityTally::from_readings(readings).into()
}

/// Whole-number percentage; no renormalisation across classes.
pub fn pct(part: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (part as f64 / total as f64 * 100.0).round()
    }
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 { 0.0 } else { sum / count as f64 }
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_readings: usize,
    #[serde(rename = "avgPH")]
    pub avg_ph: f64,
    #[serde(rename = "avgMQ135")]
    pub avg_mq135: f64,
    pub good_quality: usize,
    pub medium_quality: usize,
    pub poor_quality: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_reading: Option<ProcessedReading>,
}

impl DashboardStats {
    /// Expects readings sorted newest first.
    pub fn from_processed(readings: &[ProcessedReading]) -> Self {
        if readings.is_empty() {
            return Self::default();
        }

        let tally: QualityTally = readings.iter().map(ProcessedReading::quality).collect();

        Self {
            total_readings: readings.len(),
            avg_ph: round_to(mean(readings.iter().map(|r| r.reading.ph)), 2),
            avg_mq135: mean(readings.iter().map(|r| r.reading.mq135)).round(),
            good_quality: tally.baik,
            medium_quality: tally.sedang,
            poor_quality: tally.buruk,
            latest_reading: readings.first().cloned(),
        }
    }
}

/// End-of-day snapshot used for day-over-day comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySummary {
    pub date: String,
    pub timestamp: i64,
    pub total_readings: usize,
    #[serde(rename = "avgPH")]
    pub avg_ph: f64,
    #[serde(rename = "avgMQ135")]
    pub avg_mq135: f64,
    #[serde(rename = "minPH")]
    pub min_ph: f64,
    #[serde(rename = "maxPH")]
    pub max_ph: f64,
    #[serde(rename = "minMQ135")]
    pub min_mq135: f64,
    #[serde(rename = "maxMQ135")]
    pub max_mq135: f64,
    pub good_quality: usize,
    pub medium_quality: usize,
    pub poor_quality: usize,
    pub good_quality_percentage: f64,
    pub medium_quality_percentage: f64,
    pub poor_quality_percentage: f64,
}

impl DailySummary {
    pub fn from_readings(readings: &[RawReading], now: DateTime<FixedOffset>) -> Option<Self> {
        if readings.is_empty() {
            return None;
        }

        let stats = aggregate(readings);
        let ph = readings.iter().map(|r| r.ph);
        let mq135 = readings.iter().map(|r| r.mq135);

        Some(Self {
            date: now.format("%Y-%m-%d").to_string(),
            timestamp: now.timestamp_millis(),
            total_readings: stats.total,
            avg_ph: round_to(mean(ph.clone()), 2),
            avg_mq135: mean(mq135.clone()).round(),
            min_ph: round_to(ph.clone().fold(f64::INFINITY, f64::min), 2),
            max_ph: round_to(ph.fold(f64::NEG_INFINITY, f64::max), 2),
            min_mq135: mq135.clone().fold(f64::INFINITY, f64::min).round(),
            max_mq135: mq135.fold(f64::NEG_INFINITY, f64::max).round(),
            good_quality: stats.baik,
            medium_quality: stats.sedang,
            poor_quality: stats.buruk,
            good_quality_percentage: stats.baik_pct,
            medium_quality_percentage: stats.sedang_pct,
            poor_quality_percentage: stats.buruk_pct,
        })
    }
}
