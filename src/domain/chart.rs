// Chart-ready series derived from processed readings
use crate::domain::processed::ProcessedReading;
use crate::domain::quality::QualityClass;
use crate::domain::reading::RawReading;
use crate::domain::statistics::{round_to, QualityTally};
use chrono::{DateTime, Duration, FixedOffset, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Ph,
    Mq135,
}

impl Metric {
    pub fn value(&self, reading: &RawReading) -> f64 {
        match self {
            Metric::Ph => reading.ph,
            Metric::Mq135 => reading.mq135,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CombinedChart {
    pub labels: Vec<String>,
    #[serde(rename = "pH")]
    pub ph: Vec<f64>,
    pub mq135: Vec<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyAverages {
    pub labels: Vec<String>,
    #[serde(rename = "avgPH")]
    pub avg_ph: Vec<f64>,
    #[serde(rename = "avgMQ135")]
    pub avg_mq135: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityDistribution {
    pub labels: Vec<String>,
    pub data: Vec<usize>,
}

impl QualityDistribution {
    pub fn from_processed(readings: &[ProcessedReading]) -> Self {
        let tally: QualityTally = readings.iter().map(ProcessedReading::quality).collect();
        Self {
            labels: QualityClass::ALL.iter().map(QualityClass::distribution_label).collect(),
            data: QualityClass::ALL.iter().map(|q| tally.count(*q)).collect(),
        }
    }
}

fn time_label(reading: &ProcessedReading, offset: &FixedOffset) -> String {
    reading.date_time.with_timezone(offset).format("%H:%M").to_string()
}

/// Latest `limit` readings in chronological order. Input is sorted newest first.
fn latest_chronological(readings: &[ProcessedReading], limit: usize) -> impl Iterator<Item = &ProcessedReading> {
    readings[..limit.min(readings.len())].iter().rev()
}

pub fn metric_series(
    readings: &[ProcessedReading],
    metric: Metric,
    limit: usize,
    offset: &FixedOffset,
) -> ChartSeries {
    let (labels, data) = latest_chronological(readings, limit)
        .map(|r| (time_label(r, offset), metric.value(&r.reading)))
        .unzip();
    ChartSeries { labels, data }
}

pub fn combined_series(readings: &[ProcessedReading], limit: usize, offset: &FixedOffset) -> CombinedChart {
    let mut chart = CombinedChart::default();
    for r in latest_chronological(readings, limit) {
        chart.labels.push(time_label(r, offset));
        chart.ph.push(r.reading.ph);
        chart.mq135.push(r.reading.mq135);
    }
    chart
}

/// Averages per wall-clock hour over the trailing window, ordered by hour label.
///
/// A window reaching past the representable range covers every reading.
pub fn hourly_averages(
    readings: &[ProcessedReading],
    now: DateTime<Utc>,
    window_hours: i64,
    offset: &FixedOffset,
) -> HourlyAverages {
    let since = Duration::try_hours(window_hours)
        .and_then(|window| now.checked_sub_signed(window))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let mut buckets: BTreeMap<String, (Vec<f64>, Vec<f64>)> = BTreeMap::new();

    for r in readings.iter().filter(|r| r.date_time >= since) {
        let hour = r.date_time.with_timezone(offset).format("%H:00").to_string();
        let (ph, mq135) = buckets.entry(hour).or_default();
        ph.push(r.reading.ph);
        mq135.push(r.reading.mq135);
    }

    let mut averages = HourlyAverages::default();
    for (hour, (ph, mq135)) in buckets {
        averages.labels.push(hour);
        averages.avg_ph.push(round_to(ph.iter().sum::<f64>() / ph.len() as f64, 2));
        averages.avg_mq135.push((mq135.iter().sum::<f64>() / mq135.len() as f64).round());
    }
    averages
}

/// Count of readings per free-text colour label.
pub fn colour_distribution(readings: &[ProcessedReading]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for r in readings {
        *counts.entry(r.reading.color.clone()).or_insert(0) += 1;
    }
    counts
}
