// Classification service - Use case for classifying stored readings
use crate::application::reading_repository::{ReadingRepository, StoredReading};
use crate::domain::processed::ProcessedReading;
use chrono::{DateTime, Utc};
use std::sync::Arc;

#[derive(Clone)]
pub struct ClassificationService {
    repository: Arc<dyn ReadingRepository>,
}

impl ClassificationService {
    pub fn new(repository: Arc<dyn ReadingRepository>) -> Self {
        Self { repository }
    }

    pub async fn fetch_stored(&self) -> anyhow::Result<Vec<StoredReading>> {
        self.repository.fetch_readings().await
    }

    /// All readings classified against `now`, newest first
    pub async fn fetch_processed(&self, now: DateTime<Utc>) -> anyhow::Result<Vec<ProcessedReading>> {
        let stored = self.fetch_stored().await?;
        let readings = process_all(stored, now);

        tracing::info!("Classified {} readings", readings.len());

        Ok(readings)
    }

    pub async fn latest_reading(&self, now: DateTime<Utc>) -> anyhow::Result<Option<ProcessedReading>> {
        let readings = self.fetch_processed(now).await?;
        Ok(readings.into_iter().next())
    }

    /// Readings whose timestamp falls within `[start, end]`
    pub async fn readings_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> anyhow::Result<Vec<ProcessedReading>> {
        let readings = self.fetch_processed(now).await?;
        Ok(readings
            .into_iter()
            .filter(|r| r.date_time >= start && r.date_time <= end)
            .collect())
    }
}

pub fn process_all(stored: Vec<StoredReading>, now: DateTime<Utc>) -> Vec<ProcessedReading> {
    let now_ms = now.timestamp_millis();
    let mut readings: Vec<ProcessedReading> = stored
        .into_iter()
        .map(|s| ProcessedReading::new(s.id, s.reading, now_ms))
        .collect();

    readings.sort_by(|a, b| b.date_time.cmp(&a.date_time));
    readings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::reading_repository::StubRepository;
    use crate::domain::freshness::FreshnessClass;
    use crate::domain::quality::QualityClass;
    use crate::domain::reading::RawReading;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 5, 0, 0).unwrap()
    }

    fn stored(id: &str, hours_ago: i64, mq135: f64) -> StoredReading {
        let timestamp = (now() - Duration::hours(hours_ago)).timestamp_millis();
        let reading = RawReading::new("Putih".into(), mq135, 6.6, "255,255,255".into(), timestamp)
            .with_temperature(6.0);
        StoredReading::new(id, reading)
    }

    fn service(readings: Vec<StoredReading>) -> ClassificationService {
        ClassificationService::new(Arc::new(StubRepository::new(readings)))
    }

    #[test]
    fn test_process_all_sorts_newest_first() {
        let readings = process_all(vec![stored("old", 8, 45.0), stored("new", 1, 45.0), stored("mid", 3, 150.0)], now());
        let ids: Vec<&str> = readings.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(ids, vec!["new", "mid", "old"]);
        assert_eq!(readings[0].freshness, FreshnessClass::Segar);
        assert_eq!(readings[1].freshness, FreshnessClass::CukupSegar);
        assert_eq!(readings[2].freshness, FreshnessClass::TidakSegar);
        assert_eq!(readings[0].quality(), QualityClass::Baik);
    }

    #[tokio::test]
    async fn test_latest_reading() {
        let service = service(vec![stored("a", 5, 45.0), stored("b", 2, 45.0)]);
        let latest = service.latest_reading(now()).await.unwrap();

        assert_eq!(latest.map(|r| r.id), Some("b".to_string()));
    }

    #[tokio::test]
    async fn test_latest_reading_empty_store() {
        let service = service(vec![]);

        assert!(service.latest_reading(now()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_readings_in_range_is_inclusive() {
        let service = service(vec![stored("a", 1, 45.0), stored("b", 4, 45.0), stored("c", 10, 45.0)]);
        let readings = service
            .readings_in_range(now() - Duration::hours(4), now() - Duration::hours(1), now())
            .await
            .unwrap();
        let ids: Vec<&str> = readings.iter().map(|r| r.id.as_str()).collect();

        assert_eq!(ids, vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_repository_error_propagates() {
        let service = ClassificationService::new(Arc::new(StubRepository::failing()));

        assert!(service.fetch_processed(now()).await.is_err());
    }
}
