// Repository trait for milk reading access
use crate::domain::reading::RawReading;
use async_trait::async_trait;

/// A stored reading together with the key it was stored under.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredReading {
    pub id: String,
    pub reading: RawReading,
}

impl StoredReading {
    pub fn new(id: impl Into<String>, reading: RawReading) -> Self {
        Self {
            id: id.into(),
            reading,
        }
    }
}

#[async_trait]
pub trait ReadingRepository: Send + Sync {
    /// Fetch every reading currently held by the store, in no particular order
    async fn fetch_readings(&self) -> anyhow::Result<Vec<StoredReading>>;
}

#[cfg(test)]
pub struct StubRepository {
    readings: Vec<StoredReading>,
    fail: bool,
    fetches: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl StubRepository {
    pub fn new(readings: Vec<StoredReading>) -> Self {
        Self {
            readings,
            fail: false,
            fetches: Default::default(),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new(Vec::new())
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
#[async_trait]
impl ReadingRepository for StubRepository {
    async fn fetch_readings(&self) -> anyhow::Result<Vec<StoredReading>> {
        self.fetches.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        if self.fail {
            anyhow::bail!("store unavailable");
        }
        Ok(self.readings.clone())
    }
}
