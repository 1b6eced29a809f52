use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;

/// Lowest concentration the MQ135 can report, in ppm.
pub const MIN_PPM: f64 = 0.0;
/// Highest concentration accepted, in ppm.
pub const MAX_PPM: f64 = 5000.0;

/// Why an incoming reading was rejected. The messages are what the device
/// and the dashboard display, so they stay in Spanish.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Falta el campo 'valor'")]
    MissingField,
    #[error("El campo 'valor' debe ser numérico")]
    NotNumeric,
    #[error("El valor debe estar entre 0 y 5000 ppm")]
    OutOfRange(f64),
    #[error("Cuerpo JSON inválido: {0}")]
    MalformedBody(String),
}

/// Body of `POST /api/lectura`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CreateReadingRequest {
    /// Gas concentration in ppm, between 0 and 5000 inclusive.
    pub valor: f64,
}

impl TryFrom<&Value> for CreateReadingRequest {
    type Error = ValidationError;

    fn try_from(payload: &Value) -> Result<Self, Self::Error> {
        validate(payload).map(|valor| Self { valor })
    }
}

/// Checks presence, type and range of `valor` and returns it.
///
/// Anything that is not a JSON object is treated as lacking the field.
/// Booleans are not numbers here, even though some clients send `true`
/// for 1.
pub fn validate(payload: &Value) -> Result<f64, ValidationError> {
    let valor = payload
        .as_object()
        .and_then(|fields| fields.get("valor"))
        .ok_or(ValidationError::MissingField)?;

    let value = match valor {
        Value::Number(n) => n.as_f64().ok_or(ValidationError::NotNumeric)?,
        _ => return Err(ValidationError::NotNumeric),
    };

    if !(MIN_PPM..=MAX_PPM).contains(&value) {
        return Err(ValidationError::OutOfRange(value));
    }

    Ok(value)
}
