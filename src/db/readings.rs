use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{models::Reading, ReadingRepository, StorageError};

#[derive(Clone)]
pub struct PgReadingRepository {
    pool: PgPool,
}

impl PgReadingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingRepository for PgReadingRepository {
    async fn insert(
        &self,
        value: f64,
        recorded_at: Option<DateTime<Utc>>,
    ) -> Result<Reading, StorageError> {
        let reading = sqlx::query_as::<_, Reading>(
            r#"
            INSERT INTO lecturas (valor, fecha)
            VALUES ($1, COALESCE($2::timestamptz, now()))
            RETURNING id, valor, fecha
            "#,
        )
        .bind(value)
        .bind(recorded_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(reading)
    }

    async fn list_recent(&self, limit: u32) -> Result<Vec<Reading>, StorageError> {
        let rows = sqlx::query_as::<_, Reading>(
            r#"
            SELECT id, valor, fecha
            FROM lecturas
            ORDER BY fecha DESC, id DESC
            LIMIT $1
            "#,
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

// ---------------------------------------------------------------------------
// Tests (need a Postgres reachable through DATABASE_URL)
// ---------------------------------------------------------------------------
