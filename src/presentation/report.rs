// Dashboard report assembled from the application services
use crate::application::dashboard_service::DashboardService;
use crate::domain::chart::{ChartSeries, CombinedChart, HourlyAverages, Metric, QualityDistribution};
use crate::domain::processed::ProcessedReading;
use crate::domain::statistics::{BatchStatistics, DailySummary, DashboardStats};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub generated_at: DateTime<Utc>,
    pub stats: DashboardStats,
    pub batch: BatchStatistics,
    pub quality_distribution: QualityDistribution,
    #[serde(rename = "pHChart")]
    pub ph_chart: ChartSeries,
    #[serde(rename = "mq135Chart")]
    pub mq135_chart: ChartSeries,
    pub combined_chart: CombinedChart,
    pub hourly_averages: HourlyAverages,
    pub colour_distribution: BTreeMap<String, usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily_summary: Option<DailySummary>,
    pub readings: Vec<ProcessedReading>,
}

impl DashboardReport {
    /// Builds every section from a single read of the store
    pub async fn build(dashboard: &DashboardService, now: DateTime<Utc>) -> anyhow::Result<Self> {
        let snapshot = dashboard.snapshot(now).await?;
        let batch = dashboard.batch_statistics(&snapshot).await?;

        Ok(Self {
            generated_at: snapshot.now,
            stats: dashboard.dashboard_stats(&snapshot),
            batch,
            quality_distribution: dashboard.quality_distribution(&snapshot),
            ph_chart: dashboard.metric_chart(&snapshot, Metric::Ph),
            mq135_chart: dashboard.metric_chart(&snapshot, Metric::Mq135),
            combined_chart: dashboard.combined_chart(&snapshot),
            hourly_averages: dashboard.hourly_averages(&snapshot),
            colour_distribution: dashboard.colour_distribution(&snapshot),
            daily_summary: dashboard.daily_summary(&snapshot),
            readings: snapshot.readings,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::classification_service::ClassificationService;
    use crate::application::reading_repository::{StoredReading, StubRepository};
    use crate::domain::reading::RawReading;
    use crate::infrastructure::config::{AggregationSettings, DashboardSettings};
    use chrono::TimeZone;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_report_shape() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 5, 0, 0).unwrap();
        let reading = RawReading::new(
            "Putih".into(),
            45.0,
            6.6,
            "255,255,255".into(),
            now.timestamp_millis() - 60_000,
        )
        .with_temperature(6.0);
        let repository = Arc::new(StubRepository::new(vec![StoredReading::new("-R1", reading)]));
        let classification = ClassificationService::new(repository.clone());
        let dashboard = DashboardService::new(
            classification,
            DashboardSettings::default(),
            AggregationSettings::default(),
        )
        .unwrap();

        let report = DashboardReport::build(&dashboard, now).await.unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["stats"]["totalReadings"], 1);
        assert_eq!(json["batch"]["baikPct"], 100.0);
        assert_eq!(json["pHChart"]["data"][0], 6.6);
        assert_eq!(json["readings"][0]["quality"], "Baik");
        assert_eq!(json["readings"][0]["freshness"], "Segar");
        assert_eq!(json["dailySummary"]["date"], "2024-05-01");
        assert_eq!(repository.fetch_count(), 1);
    }
}
