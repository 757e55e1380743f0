// Dashboard service - Use cases for building dashboard statistics
use crate::application::classification_service::ClassificationService;
use crate::domain::chart::{
    colour_distribution, combined_series, hourly_averages, metric_series, ChartSeries, CombinedChart,
    HourlyAverages, Metric, QualityDistribution,
};
use crate::domain::processed::ProcessedReading;
use crate::domain::reading::RawReading;
use crate::domain::statistics::{BatchStatistics, DailySummary, DashboardStats, QualityTally};
use crate::infrastructure::config::{AggregationSettings, DashboardSettings};
use anyhow::Context;
use chrono::{DateTime, FixedOffset, Utc};
use std::collections::BTreeMap;

/// One fetch of the store, classified against a single `now`.
#[derive(Debug, Clone)]
pub struct DashboardSnapshot {
    pub now: DateTime<Utc>,
    pub readings: Vec<ProcessedReading>,
}

impl DashboardSnapshot {
    pub fn raw_readings(&self) -> Vec<RawReading> {
        self.readings.iter().map(|r| r.reading.clone()).collect()
    }
}

#[derive(Clone)]
pub struct DashboardService {
    classification: ClassificationService,
    settings: DashboardSettings,
    partition_size: usize,
    offset: FixedOffset,
}

impl DashboardService {
    pub fn new(
        classification: ClassificationService,
        settings: DashboardSettings,
        aggregation: AggregationSettings,
    ) -> anyhow::Result<Self> {
        let offset = settings.offset()?;
        Ok(Self {
            classification,
            settings,
            partition_size: aggregation.partition_size.max(1),
            offset,
        })
    }

    /// Reads the store once; every dashboard section is derived from the result
    pub async fn snapshot(&self, now: DateTime<Utc>) -> anyhow::Result<DashboardSnapshot> {
        let readings = self.classification.fetch_processed(now).await?;
        Ok(DashboardSnapshot { now, readings })
    }

    pub fn dashboard_stats(&self, snapshot: &DashboardSnapshot) -> DashboardStats {
        let stats = DashboardStats::from_processed(&snapshot.readings);

        tracing::info!(
            "Stats: Good={}, Medium={}, Poor={}",
            stats.good_quality,
            stats.medium_quality,
            stats.poor_quality
        );

        stats
    }

    /// Batch statistics computed over partitions of the snapshot on blocking tasks
    pub async fn batch_statistics(&self, snapshot: &DashboardSnapshot) -> anyhow::Result<BatchStatistics> {
        let tally = tally_partitioned(snapshot.raw_readings(), self.partition_size).await?;
        Ok(tally.into())
    }

    pub fn quality_distribution(&self, snapshot: &DashboardSnapshot) -> QualityDistribution {
        QualityDistribution::from_processed(&snapshot.readings)
    }

    pub fn metric_chart(&self, snapshot: &DashboardSnapshot, metric: Metric) -> ChartSeries {
        let chart = metric_series(&snapshot.readings, metric, self.settings.chart_limit, &self.offset);

        tracing::debug!("{:?} chart: {} data points", metric, chart.data.len());

        chart
    }

    pub fn combined_chart(&self, snapshot: &DashboardSnapshot) -> CombinedChart {
        combined_series(&snapshot.readings, self.settings.combined_chart_limit, &self.offset)
    }

    pub fn hourly_averages(&self, snapshot: &DashboardSnapshot) -> HourlyAverages {
        hourly_averages(
            &snapshot.readings,
            snapshot.now,
            self.settings.hourly_window_hours,
            &self.offset,
        )
    }

    pub fn colour_distribution(&self, snapshot: &DashboardSnapshot) -> BTreeMap<String, usize> {
        colour_distribution(&snapshot.readings)
    }

    /// Snapshot of every stored reading, dated in the configured offset
    pub fn daily_summary(&self, snapshot: &DashboardSnapshot) -> Option<DailySummary> {
        DailySummary::from_readings(&snapshot.raw_readings(), snapshot.now.with_timezone(&self.offset))
    }
}

/// Classifies each partition on the blocking pool and merges the partial tallies.
pub async fn tally_partitioned(readings: Vec<RawReading>, partition_size: usize) -> anyhow::Result<QualityTally> {
    let partitions: Vec<Vec<RawReading>> = readings
        .chunks(partition_size.max(1))
        .map(<[RawReading]>::to_vec)
        .collect();

    tracing::debug!("Aggregating {} readings in {} partitions", readings.len(), partitions.len());

    let tasks = partitions
        .into_iter()
        .map(|partition| tokio::task::spawn_blocking(move || QualityTally::from_readings(&partition)));

    let mut tally = QualityTally::default();
    for partial in futures::future::join_all(tasks).await {
        tally = tally + partial.context("aggregation task failed")?;
    }

    Ok(tally)
}
