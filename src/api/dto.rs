use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A stored reading as the dashboard consumes it.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ReadingDto {
    /// Gas concentration in ppm.
    pub valor: f64,
    /// When the reading was stored (RFC 3339, UTC).
    pub fecha: DateTime<Utc>,
}

impl From<crate::db::models::Reading> for ReadingDto {
    fn from(r: crate::db::models::Reading) -> Self {
        Self {
            valor: r.value,
            fecha: r.recorded_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub mensaje: String,
}

impl MessageDto {
    pub fn new(mensaje: impl Into<String>) -> Self {
        Self {
            mensaje: mensaje.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    pub error: String,
}
