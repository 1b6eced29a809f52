pub mod models;
pub mod readings;

#[cfg(test)]
pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use thiserror::Error;

use models::Reading;

pub use readings::PgReadingRepository;

/// How many readings `GET /api/lectura` returns at most.
pub const RECENT_READINGS_LIMIT: u32 = 20;

/// The store could not be reached or refused the statement.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct StorageError(#[from] sqlx::Error);

/// Persistence of readings. Only inserts and latest-N reads exist; readings
/// are never updated or deleted.
#[async_trait]
pub trait ReadingRepository: Send + Sync + 'static {
    /// Stores one reading. With `recorded_at = None` the store stamps it
    /// with its own current UTC time.
    async fn insert(
        &self,
        value: f64,
        recorded_at: Option<DateTime<Utc>>,
    ) -> Result<Reading, StorageError>;

    /// Up to `limit` readings, newest first. Equal timestamps are ordered by
    /// descending id.
    async fn list_recent(&self, limit: u32) -> Result<Vec<Reading>, StorageError>;
}

pub async fn create_pool(options: PgConnectOptions, max_connections: u32) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await?;
    Ok(pool)
}

/// Creates the `lecturas` table if it does not exist yet.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
