use chrono::Utc;
use tracing::{error, info, warn};

use backend_domain::{AuditLogRecord, DetectionReport};

use crate::state::MAX_BATCH_ENTRIES;
use crate::{AppError, AppState};

/// Runs the rule set over one batch, records metrics and hands qualifying
/// anomalies to the alert service.
pub async fn run_detection(
    state: &AppState,
    records: Vec<AuditLogRecord>,
) -> Result<DetectionReport, AppError> {
    if records.len() > MAX_BATCH_ENTRIES {
        return Err(AppError::BadRequest(format!(
            "batch of {} entries exceeds the limit of {}",
            records.len(),
            MAX_BATCH_ENTRIES
        )));
    }

    let detector = state.detector.clone();
    let run_at = Utc::now();
    let report = tokio::task::spawn_blocking(move || detector.detect(&records, run_at))
        .await
        .map_err(|err| {
            error!("detection task failed: {}", err);
            state.metrics.record_detection_error();
            AppError::Internal(err.into())
        })?;

    state.metrics.record_run(&report);
    for rejected in &report.rejected {
        warn!("{}", rejected);
    }
    info!(
        evaluated = report.evaluated,
        rejected = report.rejected.len(),
        anomalies = report.anomalies.len(),
        "watchdog scan complete"
    );

    if !report.anomalies.is_empty() {
        state
            .alert_service
            .spawn_alerts(state.config.clone(), report.anomalies.clone());
    }

    Ok(report)
}
