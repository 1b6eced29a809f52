use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `lecturas` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Reading {
    pub id: i64,
    /// Gas concentration in ppm.
    #[sqlx(rename = "valor")]
    pub value: f64,
    #[sqlx(rename = "fecha")]
    pub recorded_at: DateTime<Utc>,
}
