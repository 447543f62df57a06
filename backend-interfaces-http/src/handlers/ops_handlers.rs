use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, HeaderValue};
use axum::response::IntoResponse;
use axum::Json;

use backend_application::queries::alert_queries;
use backend_application::AppState;
use backend_domain::AlertDeliveryRecord;

use crate::error::HttpError;

#[derive(serde::Serialize)]
pub struct HealthStatus {
    status: &'static str,
}

#[derive(serde::Deserialize)]
pub struct AlertDeliveryQuery {
    pub limit: Option<usize>,
}

pub async fn health_live() -> Json<HealthStatus> {
    Json(HealthStatus { status: "ok" })
}

pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let payload = state.metrics.render_prometheus();
    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("text/plain; version=0.0.4; charset=utf-8"),
    );
    (headers, payload)
}

pub async fn list_alert_deliveries(
    State(state): State<AppState>,
    query: Result<Query<AlertDeliveryQuery>, QueryRejection>,
) -> Result<Json<Vec<AlertDeliveryRecord>>, HttpError> {
    let Query(query) = query?;
    Ok(Json(alert_queries::list_alert_deliveries(&state, query.limit).await))
}

pub async fn get_last_alert_delivery(
    State(state): State<AppState>,
) -> Result<Json<AlertDeliveryRecord>, HttpError> {
    alert_queries::last_alert_delivery(&state)
        .await
        .map(Json)
        .ok_or(HttpError::NotFound)
}
