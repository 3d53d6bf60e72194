use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct WarmupResponse {
    pub status: String,
    pub provider: String,
}

#[derive(Serialize)]
pub struct CacheClearResponse {
    pub status: String,
    pub removed: usize,
}

#[derive(Serialize)]
pub struct MetricsResponse {
    pub cache_stats: CacheStatsBody,
    pub gate: GateBody,
    pub prewarmed: bool,
}

#[derive(Serialize)]
pub struct CacheStatsBody {
    pub size: usize,
    pub max_size: usize,
    pub ttl_seconds: u64,
    pub hits: u64,
    pub misses: u64,
}

#[derive(Serialize)]
pub struct GateBody {
    pub capacity: usize,
    pub in_use: usize,
}

pub async fn warmup_handler(State(state): State<AppState>) -> Response {
    match state.transcription_service.warm_up().await {
        Ok(provider) => (
            StatusCode::OK,
            Json(WarmupResponse {
                status: "warmed".to_string(),
                provider: provider.name().to_string(),
            }),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Warm-up request failed");
            e.into_response()
        }
    }
}

pub async fn clear_cache_handler(State(state): State<AppState>) -> impl IntoResponse {
    let removed = state.transcription_service.clear_cache();
    (
        StatusCode::OK,
        Json(CacheClearResponse {
            status: "cleared".to_string(),
            removed,
        }),
    )
}

pub async fn metrics_handler(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.transcription_service.stats();
    Json(MetricsResponse {
        cache_stats: CacheStatsBody {
            size: stats.cache.size,
            max_size: stats.cache.max_size,
            ttl_seconds: stats.cache.ttl_seconds,
            hits: stats.cache.hits,
            misses: stats.cache.misses,
        },
        gate: GateBody {
            capacity: stats.gate_capacity,
            in_use: stats.gate_in_use,
        },
        prewarmed: stats.prewarmed,
    })
}
