//! Cache introspection and flush. Debug surface, not authenticated.

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use tracing::info;

use crate::{
    main_lib::AppState,
    models::{CacheStatsResponse, MessageResponse},
};

async fn get_cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStatsResponse> {
    let keys = state.cache.keys();
    Json(CacheStatsResponse {
        total_cached: keys.len(),
        keys,
        stats: state.cache.stats(),
    })
}

async fn clear_cache(State(state): State<Arc<AppState>>) -> Json<MessageResponse> {
    state.cache.flush_all();
    info!("Cache cleared");
    Json(MessageResponse {
        success: true,
        message: "Cache cleared".to_string(),
    })
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/cache/stats", get(get_cache_stats))
        .route("/cache/clear", post(clear_cache))
}
