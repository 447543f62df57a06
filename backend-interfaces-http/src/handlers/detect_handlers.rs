use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use backend_application::commands::detect_commands;
use backend_application::dtos::{DetectRequest, RuleCatalog};
use backend_application::queries::rule_queries;
use backend_application::AppState;
use backend_domain::DetectionReport;

use crate::error::HttpError;

pub async fn detect_anomalies(
    State(state): State<AppState>,
    payload: Result<Json<DetectRequest>, JsonRejection>,
) -> Result<Json<DetectionReport>, HttpError> {
    let Json(request) = payload?;
    let report = detect_commands::run_detection(&state, request.entries).await?;
    Ok(Json(report))
}

pub async fn list_rules(State(state): State<AppState>) -> Json<RuleCatalog> {
    Json(rule_queries::list_rules(&state))
}
