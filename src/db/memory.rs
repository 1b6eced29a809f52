use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use super::{models::Reading, ReadingRepository, StorageError};

/// Readings kept in a `Vec`, for handler tests that have no database.
///
/// Clones share the same rows. `set_failing(true)` makes every call return a
/// `StorageError`, the way a dropped connection would.
#[derive(Clone, Default)]
pub struct InMemoryReadings {
    rows: Arc<RwLock<Vec<Reading>>>,
    failing: Arc<AtomicBool>,
}

impl InMemoryReadings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn count(&self) -> usize {
        self.rows.read().await.len()
    }

    fn check(&self) -> Result<(), StorageError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(sqlx::Error::PoolClosed.into());
        }
        Ok(())
    }
}

#[async_trait]
impl ReadingRepository for InMemoryReadings {
    async fn insert(
        &self,
        value: f64,
        recorded_at: Option<DateTime<Utc>>,
    ) -> Result<Reading, StorageError> {
        self.check()?;
        let mut rows = self.rows.write().await;
        let reading = Reading {
            id: rows.len() as i64 + 1,
            value,
            recorded_at: recorded_at.unwrap_or_else(Utc::now),
        };
        rows.push(reading.clone());
        Ok(reading)
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Reading>, StorageError> {
        self.check()?;
        let mut rows = self.rows.read().await.clone();
        rows.sort_by(|a, b| {
            b.recorded_at
                .cmp(&a.recorded_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        rows.truncate(limit as usize);
        Ok(rows)
    }
}
