use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;
use tracing::{error, info, warn};
use utoipa::OpenApi;

use super::{
    dto::{ErrorDto, MessageDto, ReadingDto},
    errors::AppError,
    AppState,
};
use crate::{db::RECENT_READINGS_LIMIT, validation::CreateReadingRequest};

pub const STATUS_MESSAGE: &str = "API MQ135 funcionando correctamente";
pub const READING_STORED_MESSAGE: &str = "Lectura guardada correctamente";

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Liveness check; does not touch the database.
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", body = MessageDto),
    ),
    tag = "system"
)]
pub async fn status() -> Json<MessageDto> {
    Json(MessageDto::new(STATUS_MESSAGE))
}

/// Store one reading sent by the sensor.
#[utoipa::path(
    post,
    path = "/api/lectura",
    request_body = CreateReadingRequest,
    responses(
        (status = 201, description = "Reading stored", body = MessageDto),
        (status = 400, description = "Missing, non-numeric or out-of-range `valor`, or a body that is not JSON", body = ErrorDto),
        (status = 500, description = "Storage failure", body = ErrorDto),
    ),
    tag = "lecturas"
)]
pub async fn create_reading(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<MessageDto>), AppError> {
    let request = payload
        .map_err(AppError::from)
        .and_then(|Json(body)| CreateReadingRequest::try_from(&body).map_err(AppError::from))
        .inspect_err(|e| warn!(error = %e, "Rejected reading payload"))?;

    let reading = state
        .readings
        .insert(request.valor, None)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to store reading"))?;

    info!(id = reading.id, value_ppm = reading.value, "Reading stored");
    Ok((StatusCode::CREATED, Json(MessageDto::new(READING_STORED_MESSAGE))))
}

/// The latest 20 readings, newest first.
#[utoipa::path(
    get,
    path = "/api/lectura",
    responses(
        (status = 200, description = "Latest readings, newest first", body = Vec<ReadingDto>),
        (status = 500, description = "Storage failure", body = ErrorDto),
    ),
    tag = "lecturas"
)]
pub async fn list_readings(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReadingDto>>, AppError> {
    let rows = state
        .readings
        .list_recent(RECENT_READINGS_LIMIT)
        .await
        .inspect_err(|e| error!(error = %e, "Failed to fetch readings"))?;

    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

// ---------------------------------------------------------------------------
// OpenAPI spec
// ---------------------------------------------------------------------------

#[derive(OpenApi)]
#[openapi(
    paths(status, create_reading, list_readings),
    components(schemas(ReadingDto, MessageDto, ErrorDto, CreateReadingRequest)),
    tags(
        (name = "lecturas", description = "MQ135 air-quality readings"),
        (name = "system",   description = "System endpoints"),
    ),
    info(
        title = "Air Quality API",
        version = "0.1.0",
        description = "Ingestion and retrieval of MQ135 gas readings (ppm)"
    )
)]
pub struct ApiDoc;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
