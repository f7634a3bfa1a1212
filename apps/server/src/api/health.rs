use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};

use crate::{
    main_lib::AppState,
    models::{StatusResponse, ENDPOINTS},
};

async fn get_status(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "online",
        message: "Devstats API is running".to_string(),
        environment: state.environment.clone(),
        endpoints: ENDPOINTS,
    })
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(get_status))
        .route("/healthz", get(healthz))
}
