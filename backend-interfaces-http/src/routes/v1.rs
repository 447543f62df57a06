use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;

use backend_application::AppState;

use crate::handlers::{detect_handlers, ops_handlers};

pub fn build_router(state: AppState) -> Router {
    // Json's own 2 MiB cap would otherwise undercut max_body_bytes.
    let body_limit = usize::try_from(state.config.max_body_bytes).unwrap_or(usize::MAX);
    Router::new()
        .route(
            "/v1/watchdog/detect",
            post(detect_handlers::detect_anomalies),
        )
        .route("/v1/watchdog/rules", get(detect_handlers::list_rules))
        .route(
            "/v1/ops/alert-deliveries",
            get(ops_handlers::list_alert_deliveries),
        )
        .route(
            "/v1/ops/alert-deliveries/last",
            get(ops_handlers::get_last_alert_delivery),
        )
        .route("/v1/ops/health/live", get(ops_handlers::health_live))
        .route(
            "/v1/ops/metrics/prometheus",
            get(ops_handlers::metrics_prometheus),
        )
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
