use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub system: SystemStatus,
}

#[derive(Serialize)]
pub struct SystemStatus {
    pub prewarmed: bool,
    pub active_connections: usize,
    pub max_connections: usize,
    pub cache_size: usize,
}

pub async fn health_handler(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.transcription_service.stats();
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            system: SystemStatus {
                prewarmed: stats.prewarmed,
                active_connections: stats.gate_in_use,
                max_connections: stats.gate_capacity,
                cache_size: stats.cache.size,
            },
        }),
    )
}
