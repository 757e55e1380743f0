// JSON export repository implementation
use crate::application::reading_repository::{ReadingRepository, StoredReading};
use crate::domain::reading::RawReading;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("failed to read readings export {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse readings export {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Either a full database export or just the `readings` node, keyed by push id.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReadingsExport {
    Database { readings: BTreeMap<String, RawReading> },
    Readings(BTreeMap<String, RawReading>),
}

/// Reads a realtime-database JSON export from disk on every fetch.
#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    path: PathBuf,
}

impl JsonFileRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Parses export text. An empty export (`null`) yields no readings.
pub fn parse_export(json: &str) -> Result<Vec<StoredReading>, serde_json::Error> {
    let export: Option<ReadingsExport> = serde_json::from_str(json)?;

    let readings = match export {
        Some(ReadingsExport::Database { readings }) => readings,
        Some(ReadingsExport::Readings(readings)) => readings,
        None => BTreeMap::new(),
    };

    Ok(readings
        .into_iter()
        .map(|(id, reading)| StoredReading::new(id, reading))
        .collect())
}

#[async_trait]
impl ReadingRepository for JsonFileRepository {
    async fn fetch_readings(&self) -> anyhow::Result<Vec<StoredReading>> {
        tracing::debug!("Loading readings export from {}", self.path.display());

        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| RepositoryError::Io {
                path: self.path.clone(),
                source,
            })?;

        let readings = parse_export(&json).map_err(|source| RepositoryError::Parse {
            path: self.path.clone(),
            source,
        })?;

        if readings.is_empty() {
            tracing::warn!("No readings found in {}", self.path.display());
        }

        Ok(readings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const READINGS: &str = r#"{
        "-Reading001": {"color": "Putih", "mq135": 45, "pH": 6.5, "rgb": "255,255,255", "timestamp": 1700000000000},
        "-Reading002": {"color": "Kekuningan", "mq135": 85, "pH": 6.8, "rgb": "255,235,210", "timestamp": 1700000600000, "temperature": 6}
    }"#;

    #[test]
    fn test_parse_readings_node() {
        let readings = parse_export(READINGS).unwrap();

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[0].id, "-Reading001");
        assert_eq!(readings[1].reading.temperature, Some(6.0));
    }

    #[test]
    fn test_parse_database_export() {
        let json = format!(r#"{{"readings": {}, "statistics": {{"daily": {{}}}}}}"#, READINGS);
        let readings = parse_export(&json).unwrap();

        assert_eq!(readings.len(), 2);
        assert_eq!(readings[1].reading.color, "Kekuningan");
    }

    #[test]
    fn test_parse_empty_export() {
        assert!(parse_export("null").unwrap().is_empty());
        assert!(parse_export("{}").unwrap().is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_record() {
        assert!(parse_export(r#"{"-R1": {"color": "Putih"}}"#).is_err());
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let repository = JsonFileRepository::new("does/not/exist.json");
        let err = repository.fetch_readings().await.unwrap_err();

        assert!(matches!(
            err.downcast_ref::<RepositoryError>(),
            Some(RepositoryError::Io { .. })
        ));
    }

    #[tokio::test]
    async fn test_fetch_from_file() {
        let path = std::env::temp_dir().join(format!("milk-readings-{}.json", std::process::id()));
        tokio::fs::write(&path, READINGS).await.unwrap();

        let readings = JsonFileRepository::new(&path).fetch_readings().await.unwrap();
        tokio::fs::remove_file(&path).await.unwrap();

        assert_eq!(readings.len(), 2);
    }
}
