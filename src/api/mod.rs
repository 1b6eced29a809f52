pub mod dto;
pub mod errors;
pub mod handlers;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;

use crate::db::ReadingRepository;
use handlers::ApiDoc;

/// Everything a handler needs, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub readings: Arc<dyn ReadingRepository>,
}

impl AppState {
    pub fn new(readings: impl ReadingRepository) -> Self {
        Self {
            readings: Arc::new(readings),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .route(
            "/api/lectura",
            get(handlers::list_readings).post(handlers::create_reading),
        )
        .with_state(state)
        .split_for_parts();

    router
        .route("/", get(handlers::status))
        .route(
            "/api-docs/openapi.json",
            get(move || async move { axum::Json(api) }),
        )
        .layer(TraceLayer::new_for_http())
        // The dashboard is served from another origin.
        .layer(CorsLayer::permissive())
}
