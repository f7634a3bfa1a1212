mod cache;
mod health;
mod sources;
mod stats;

use std::{any::Any, sync::Arc, time::Duration};

use axum::{
    error_handling::HandleErrorLayer,
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    BoxError, Json, Router,
};
use tower::{timeout::error::Elapsed, ServiceBuilder};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::{
    config::Config,
    error::ApiError,
    main_lib::AppState,
    models::{RouteNotFoundResponse, ENDPOINTS},
};

fn cors_layer(config: &Config) -> CorsLayer {
    let cors = CorsLayer::new().allow_methods([Method::GET, Method::POST]);
    if config.cors_allow.iter().any(|o| o == "*") {
        return cors.allow_origin(AnyOrigin);
    }

    let origins = config
        .cors_allow
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(origin) => Some(origin),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                None
            }
        })
        .collect::<Vec<_>>();
    cors.allow_origin(origins).allow_credentials(true)
}

async fn route_not_found() -> (StatusCode, Json<RouteNotFoundResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(RouteNotFoundResponse {
            success: false,
            error: "Endpoint not found",
            available_endpoints: ENDPOINTS,
        }),
    )
}

/// Last-resort boundary: a panicking handler still answers with the
/// generic failure envelope.
fn handle_panic(_err: Box<dyn Any + Send + 'static>) -> Response {
    tracing::error!("Handler panicked");
    ApiError::Internal.into_response()
}

fn timeout_error(limit: Duration, err: BoxError) -> ApiError {
    if err.is::<Elapsed>() {
        tracing::warn!("Request exceeded {} ms", limit.as_millis());
        ApiError::Timeout(limit)
    } else {
        tracing::error!("Unhandled middleware error: {}", err);
        ApiError::Internal
    }
}

/// Applies the server-wide request timeout to `router`, answering with the
/// JSON envelope when it fires.
fn with_request_timeout(router: Router<Arc<AppState>>, limit: Duration) -> Router<Arc<AppState>> {
    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(move |err: BoxError| async move {
                timeout_error(limit, err)
            }))
            .timeout(limit),
    )
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    // The combined route stays unbounded; each source is capped by its client.
    let api = with_request_timeout(
        Router::new()
            .merge(sources::router())
            .merge(cache::router()),
        config.request_timeout,
    )
    .merge(stats::router());

    Router::new()
        .merge(health::router())
        .nest("/api", api)
        .fallback(route_not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors_layer(config))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
}
